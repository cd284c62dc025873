/// A page element a simulation needs at startup could not be found.
///
/// Structural problems abort the mount of that one simulation; the others
/// keep running.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("{simulation}: required element '{element}' not found")]
    MissingElement {
        simulation: &'static str,
        element: String,
    },
    #[error("{simulation}: element '{element}' is not a {expected}")]
    WrongElementType {
        simulation: &'static str,
        element: String,
        expected: &'static str,
    },
    #[error("{simulation}: page has no document")]
    NoDocument { simulation: &'static str },
    #[error("{simulation}: browser does not provide {feature}")]
    Unsupported {
        simulation: &'static str,
        feature: &'static str,
    },
}

impl SetupError {
    pub fn missing(simulation: &'static str, element: impl Into<String>) -> Self {
        Self::MissingElement {
            simulation,
            element: element.into(),
        }
    }

    pub fn unsupported(simulation: &'static str, feature: &'static str) -> Self {
        Self::Unsupported {
            simulation,
            feature,
        }
    }

    pub fn simulation(&self) -> &'static str {
        match self {
            Self::MissingElement { simulation, .. }
            | Self::WrongElementType { simulation, .. }
            | Self::NoDocument { simulation }
            | Self::Unsupported { simulation, .. } => simulation,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid simulation config: {0}")]
    Invalid(String),
}
