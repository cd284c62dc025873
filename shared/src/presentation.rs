//! Threshold tables mapping simulation levels to what the page displays
//!
//! All mappers are pure and total over their input range.

use serde::{Deserialize, Serialize};

// ===== ATHEROSCLEROSIS =====

pub const MAX_PLAQUE_LEVEL: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaqueBand {
    Healthy,
    Minor,
    Moderate,
    Severe,
    Critical,
}

impl PlaqueBand {
    pub fn for_level(level: u8) -> Self {
        match level.min(MAX_PLAQUE_LEVEL) {
            0..=9 => PlaqueBand::Healthy,
            10..=29 => PlaqueBand::Minor,
            30..=59 => PlaqueBand::Moderate,
            60..=84 => PlaqueBand::Severe,
            _ => PlaqueBand::Critical,
        }
    }

    pub fn flow_text(self) -> &'static str {
        match self {
            PlaqueBand::Healthy => "Normal Flow",
            PlaqueBand::Minor => "Slightly Reduced",
            PlaqueBand::Moderate => "Restricted Flow",
            PlaqueBand::Severe => "Very Restricted",
            PlaqueBand::Critical => "Blocked!",
        }
    }

    pub fn flow_opacity(self) -> f64 {
        match self {
            PlaqueBand::Healthy => 1.0,
            PlaqueBand::Minor => 0.9,
            PlaqueBand::Moderate => 0.6,
            PlaqueBand::Severe => 0.3,
            PlaqueBand::Critical => 0.1,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PlaqueBand::Healthy => "Artery is relatively healthy.",
            PlaqueBand::Minor => "Minor plaque detected. Blood flow slightly affected.",
            PlaqueBand::Moderate => "Moderate plaque buildup. Blood flow is noticeably restricted.",
            PlaqueBand::Severe => "Severe plaque buildup! Blood flow is critically low.",
            PlaqueBand::Critical => {
                "Critical blockage! Artery is almost completely occluded. High risk of event!"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaquePresentation {
    pub level: u8,
    pub band: PlaqueBand,
    pub level_text: String,
    pub status: String,
    pub flow_text: &'static str,
    pub flow_opacity: f64,
}

impl PlaquePresentation {
    pub fn for_level(level: u8) -> Self {
        let level = level.min(MAX_PLAQUE_LEVEL);
        let band = PlaqueBand::for_level(level);
        PlaquePresentation {
            level,
            band,
            level_text: format!("{level}%"),
            status: format!("Plaque buildup at {level}%. {}", band.description()),
            flow_text: band.flow_text(),
            flow_opacity: band.flow_opacity(),
        }
    }

    /// Height of each of the two plaques; together they close the lumen at 100 %.
    pub fn plaque_height_px(&self, lumen_height_px: f64) -> f64 {
        (lumen_height_px / 2.0) * (f64::from(self.level) / 100.0)
    }
}

// ===== HYPERTENSION =====

pub const MAX_FACTOR_LEVEL: u8 = 2;

/// Two independently adjustable contributors to blood pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PressureFactors {
    constriction: u8,
    volume: u8,
}

impl PressureFactors {
    pub fn constriction(&self) -> u8 {
        self.constriction
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn constrict(&mut self) {
        self.constriction = (self.constriction + 1).min(MAX_FACTOR_LEVEL);
    }

    pub fn increase_volume(&mut self) {
        self.volume = (self.volume + 1).min(MAX_FACTOR_LEVEL);
    }

    pub fn reset(&mut self) {
        *self = PressureFactors::default();
    }

    pub fn total(&self) -> u8 {
        self.constriction + self.volume
    }

    pub fn category(&self) -> PressureCategory {
        PressureCategory::for_total(self.total())
    }

    pub fn status(&self) -> String {
        let category = self.category();
        format!(
            "Factors: Vessel Constriction Lvl {}/{max}, Blood Volume Lvl {}/{max}. Overall pressure is {}. ({} range)",
            self.constriction,
            self.volume,
            category.label(),
            category.range_text(),
            max = MAX_FACTOR_LEVEL,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl PressureCategory {
    pub fn for_total(total: u8) -> Self {
        match total {
            0 => PressureCategory::Normal,
            1 => PressureCategory::Elevated,
            2 => PressureCategory::Stage1,
            3 => PressureCategory::Stage2,
            _ => PressureCategory::Crisis,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PressureCategory::Normal => "Normal",
            PressureCategory::Elevated => "Elevated",
            PressureCategory::Stage1 => "Hypertension Stage 1",
            PressureCategory::Stage2 => "Hypertension Stage 2",
            PressureCategory::Crisis => "Hypertensive Crisis",
        }
    }

    pub fn range_text(self) -> &'static str {
        match self {
            PressureCategory::Normal => "Normal",
            PressureCategory::Elevated => "120-129 / <80 mmHg (Elevated)",
            PressureCategory::Stage1 => "130-139 / 80-89 mmHg (Stage 1)",
            PressureCategory::Stage2 => "140+ / 90+ mmHg (Stage 2)",
            PressureCategory::Crisis => "180+ / 120+ mmHg (CRISIS!)",
        }
    }

    /// Lumen width as a percentage of the vessel.
    pub fn lumen_width_percent(self) -> u8 {
        match self {
            PressureCategory::Normal => 90,
            PressureCategory::Elevated => 78,
            PressureCategory::Stage1 => 66,
            PressureCategory::Stage2 => 54,
            PressureCategory::Crisis => 42,
        }
    }

    pub fn lumen_color(self) -> &'static str {
        match self {
            PressureCategory::Normal => "#ffadad",
            PressureCategory::Elevated => "#ff9090",
            PressureCategory::Stage1 => "#ff7272",
            PressureCategory::Stage2 => "#ff5454",
            PressureCategory::Crisis => "#e03030",
        }
    }

    pub fn flow_description(self) -> &'static str {
        match self {
            PressureCategory::Normal => "Smooth",
            PressureCategory::Elevated => "Slightly Turbulent",
            PressureCategory::Stage1 => "Turbulent",
            PressureCategory::Stage2 => "Very Turbulent",
            PressureCategory::Crisis => "Critical!",
        }
    }

    pub fn display_text(self) -> String {
        format!("Current Blood Pressure: {}", self.label())
    }
}

// ===== SYNAPSE STRENGTH =====

const BASE_SYNAPSE_HEIGHT_PX: u32 = 4;
const MIN_SYNAPSE_HEIGHT_PX: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynapseAppearance {
    pub height_px: u32,
    pub color: &'static str,
    pub label: String,
}

impl SynapseAppearance {
    pub fn for_strength(strength: u8) -> Self {
        let height_px = (BASE_SYNAPSE_HEIGHT_PX + u32::from(strength)).max(MIN_SYNAPSE_HEIGHT_PX);
        let color = match strength {
            11.. => "#006400",
            6..=10 => "#228B22",
            _ => "#8FBC8F",
        };
        SynapseAppearance {
            height_px,
            color,
            label: format!("Strength: {strength}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaque_bands_partition_the_slider_range() {
        let cases = [
            (0, PlaqueBand::Healthy),
            (9, PlaqueBand::Healthy),
            (10, PlaqueBand::Minor),
            (29, PlaqueBand::Minor),
            (30, PlaqueBand::Moderate),
            (59, PlaqueBand::Moderate),
            (60, PlaqueBand::Severe),
            (84, PlaqueBand::Severe),
            (85, PlaqueBand::Critical),
            (100, PlaqueBand::Critical),
        ];
        for (level, band) in cases {
            assert_eq!(PlaqueBand::for_level(level), band, "level {level}");
        }
        assert_eq!(PlaqueBand::for_level(u8::MAX), PlaqueBand::Critical);
    }

    #[test]
    fn bands_never_get_better_as_plaque_grows() {
        let opacities: Vec<f64> = (0..=100)
            .map(|level| PlaqueBand::for_level(level).flow_opacity())
            .collect();
        assert!(opacities.windows(2).all(|pair| pair[1] <= pair[0]));
    }

    #[test]
    fn plaque_presentation_texts() {
        let presentation = PlaquePresentation::for_level(45);
        assert_eq!(presentation.level_text, "45%");
        assert_eq!(
            presentation.status,
            "Plaque buildup at 45%. Moderate plaque buildup. Blood flow is noticeably restricted."
        );
        assert_eq!(presentation.flow_text, "Restricted Flow");
        assert_eq!(presentation.flow_opacity, 0.6);
    }

    #[test]
    fn plaques_close_half_the_lumen_each() {
        assert_eq!(PlaquePresentation::for_level(0).plaque_height_px(80.0), 0.0);
        assert_eq!(PlaquePresentation::for_level(50).plaque_height_px(80.0), 20.0);
        assert_eq!(PlaquePresentation::for_level(100).plaque_height_px(80.0), 40.0);
        assert_eq!(PlaquePresentation::for_level(200).level, 100);
    }

    #[test]
    fn pressure_factors_saturate_at_two() {
        let mut factors = PressureFactors::default();
        for _ in 0..5 {
            factors.constrict();
        }
        assert_eq!(factors.constriction(), 2);
        assert_eq!(factors.total(), 2);
        factors.increase_volume();
        factors.increase_volume();
        factors.increase_volume();
        assert_eq!(factors.total(), 4);
        assert_eq!(factors.category(), PressureCategory::Crisis);
    }

    #[test]
    fn reset_always_returns_to_normal() {
        let mut factors = PressureFactors::default();
        factors.constrict();
        factors.increase_volume();
        factors.increase_volume();
        factors.reset();
        assert_eq!(factors.total(), 0);
        assert_eq!(factors.category(), PressureCategory::Normal);
    }

    #[test]
    fn every_total_maps_to_one_category() {
        let categories: Vec<_> = (0..=4).map(PressureCategory::for_total).collect();
        assert_eq!(
            categories,
            vec![
                PressureCategory::Normal,
                PressureCategory::Elevated,
                PressureCategory::Stage1,
                PressureCategory::Stage2,
                PressureCategory::Crisis,
            ]
        );
        let widths: Vec<_> = categories.iter().map(|c| c.lumen_width_percent()).collect();
        assert_eq!(widths, vec![90, 78, 66, 54, 42]);
    }

    #[test]
    fn pressure_status_lists_both_factors() {
        let mut factors = PressureFactors::default();
        factors.constrict();
        assert_eq!(
            factors.status(),
            "Factors: Vessel Constriction Lvl 1/2, Blood Volume Lvl 0/2. Overall pressure is Elevated. (120-129 / <80 mmHg (Elevated) range)"
        );
        assert_eq!(factors.category().display_text(), "Current Blood Pressure: Elevated");
        assert_eq!(
            PressureFactors::default().status(),
            "Factors: Vessel Constriction Lvl 0/2, Blood Volume Lvl 0/2. Overall pressure is Normal. (Normal range)"
        );
    }

    #[test]
    fn synapse_color_steps_at_six_and_eleven() {
        assert_eq!(SynapseAppearance::for_strength(5).color, "#8FBC8F");
        assert_eq!(SynapseAppearance::for_strength(6).color, "#228B22");
        assert_eq!(SynapseAppearance::for_strength(10).color, "#228B22");
        assert_eq!(SynapseAppearance::for_strength(11).color, "#006400");
    }

    #[test]
    fn synapse_height_grows_with_strength() {
        assert_eq!(SynapseAppearance::for_strength(0).height_px, 4);
        assert_eq!(SynapseAppearance::for_strength(15).height_px, 19);
        assert_eq!(SynapseAppearance::for_strength(7).label, "Strength: 7");
    }
}
