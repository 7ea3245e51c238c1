//! The shared simulation record and partial updates to it.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::astro::{self, DAYS_PER_YEAR};
use crate::core::error::Error;
use crate::math::wrap_degrees_180;

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Build from linear 0-1 components, clamping out-of-range input.
    pub fn from_unit(rgb: [f32; 3]) -> Self {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self([c(rgb[0]), c(rgb[1]), c(rgb[2])])
    }

    /// Components scaled to 0-1.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.0[0] as f32 / 255.0,
            self.0[1] as f32 / 255.0,
            self.0[2] as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::Config(format!("invalid colour '{s}'")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| Error::Config(format!("invalid colour '{s}'")))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Ground colour: fixed, or `auto` (follows the season).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GroundColor {
    Auto,
    Fixed(Color),
}

impl GroundColor {
    /// Concrete colour for a day-of-year.
    pub fn resolve(self, day: f32) -> Color {
        match self {
            GroundColor::Fixed(color) => color,
            GroundColor::Auto => {
                let normalized = day.rem_euclid(DAYS_PER_YEAR) / DAYS_PER_YEAR;
                astro::ground_color_ramp()
                    .sample(normalized)
                    .map(Color::from_unit)
                    .unwrap_or(Color::rgb(0x4c, 0x7f, 0x19))
            }
        }
    }
}

impl TryFrom<String> for GroundColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("auto") {
            Ok(GroundColor::Auto)
        } else {
            Ok(GroundColor::Fixed(value.parse()?))
        }
    }
}

impl From<GroundColor> for String {
    fn from(color: GroundColor) -> Self {
        match color {
            GroundColor::Auto => "auto".to_string(),
            GroundColor::Fixed(c) => c.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// Supported interface languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-us")]
    EnUs,
    #[serde(rename = "es")]
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::Es];

    pub fn code(self) -> &'static str {
        match self {
            Locale::EnUs => "en-us",
            Locale::Es => "es",
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationState
// ---------------------------------------------------------------------------

/// Authoritative simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationState {
    /// Day-of-year in `[0, 365)`, fractional.
    pub day: f32,
    pub earth_tilt: bool,
    /// Spin angle in radians, `[0, TAU)`.
    pub earth_rotation: f32,
    pub sun_earth_line: bool,
    /// Degrees, `[-90, 90]`.
    pub latitude: f32,
    /// Degrees, `[-180, 180]`.
    pub longitude: f32,
    pub sunray_color: Color,
    pub ground_color: GroundColor,
    pub sunray_dist_marker: bool,
    pub daily_rotation: bool,
    pub earth_gridlines: bool,
    pub language: Locale,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            day: astro::SUMMER_SOLSTICE,
            earth_tilt: true,
            earth_rotation: 0.0,
            sun_earth_line: true,
            latitude: 40.11,
            longitude: -88.2,
            sunray_color: Color::rgb(0xd8, 0xd8, 0xac),
            ground_color: GroundColor::Auto,
            sunray_dist_marker: false,
            daily_rotation: false,
            earth_gridlines: false,
            language: Locale::EnUs,
        }
    }
}

impl SimulationState {
    /// Axial tilt in radians, zero when tilt is switched off.
    pub fn tilt_radians(&self) -> f32 {
        if self.earth_tilt { astro::earth_tilt_radians() } else { 0.0 }
    }

    /// Axial tilt in degrees, zero when tilt is switched off.
    pub fn tilt_degrees(&self) -> f32 {
        if self.earth_tilt { astro::EARTH_TILT_DEGREES } else { 0.0 }
    }

    /// Noon sunray angle for the current day, tilt and latitude.
    pub fn sunray_angle(&self) -> f32 {
        astro::sunray_angle_degrees(self.day, self.tilt_degrees(), self.latitude)
    }

    /// Patch holding every field that differs between `self` and `other`,
    /// with `other`'s values.
    pub fn diff(&self, other: &SimulationState) -> StatePatch {
        let mut patch = StatePatch::default();
        let current = self;
        macro_rules! cmp {
            ($($field:ident),*) => {
                $(if current.$field != other.$field { patch.$field = Some(other.$field.clone()); })*
            };
        }
        cmp!(
            day, earth_tilt, earth_rotation, sun_earth_line, latitude, longitude,
            sunray_color, ground_color, sunray_dist_marker, daily_rotation,
            earth_gridlines, language
        );
        patch
    }

    /// Bring every field into its documented range.
    pub fn normalize(&mut self) {
        // A state loaded from outside may still carry non-finite numbers
        let defaults = SimulationState::default();
        for (value, fallback) in [
            (&mut self.day, defaults.day),
            (&mut self.earth_rotation, defaults.earth_rotation),
            (&mut self.latitude, defaults.latitude),
            (&mut self.longitude, defaults.longitude),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }
        self.day = self.day.rem_euclid(DAYS_PER_YEAR);
        // rem_euclid can round up to the period itself for tiny negatives
        if self.day >= DAYS_PER_YEAR {
            self.day = 0.0;
        }
        self.earth_rotation = self.earth_rotation.rem_euclid(TAU);
        if self.earth_rotation >= TAU {
            self.earth_rotation = 0.0;
        }
        self.latitude = self.latitude.clamp(-90.0, 90.0);
        self.longitude = wrap_degrees_180(self.longitude);
    }

    /// JSON value of one field, for interaction logging.
    pub fn field_value(&self, field: StateField) -> serde_json::Value {
        use serde_json::json;
        match field {
            StateField::Day => json!(self.day),
            StateField::EarthTilt => json!(self.earth_tilt),
            StateField::EarthRotation => json!(self.earth_rotation),
            StateField::SunEarthLine => json!(self.sun_earth_line),
            StateField::Latitude => json!(self.latitude),
            StateField::Longitude => json!(self.longitude),
            StateField::SunrayColor => json!(self.sunray_color),
            StateField::GroundColor => json!(self.ground_color),
            StateField::SunrayDistMarker => json!(self.sunray_dist_marker),
            StateField::DailyRotation => json!(self.daily_rotation),
            StateField::EarthGridlines => json!(self.earth_gridlines),
            StateField::Language => json!(self.language),
        }
    }
}

// ---------------------------------------------------------------------------
// Fields and patches
// ---------------------------------------------------------------------------

/// Closed set of observable state fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateField {
    Day,
    EarthTilt,
    EarthRotation,
    SunEarthLine,
    Latitude,
    Longitude,
    SunrayColor,
    GroundColor,
    SunrayDistMarker,
    DailyRotation,
    EarthGridlines,
    Language,
}

impl StateField {
    pub const ALL: [StateField; 12] = [
        StateField::Day,
        StateField::EarthTilt,
        StateField::EarthRotation,
        StateField::SunEarthLine,
        StateField::Latitude,
        StateField::Longitude,
        StateField::SunrayColor,
        StateField::GroundColor,
        StateField::SunrayDistMarker,
        StateField::DailyRotation,
        StateField::EarthGridlines,
        StateField::Language,
    ];

    /// Wire name, as used in JSON patches.
    pub fn name(self) -> &'static str {
        match self {
            StateField::Day => "day",
            StateField::EarthTilt => "earthTilt",
            StateField::EarthRotation => "earthRotation",
            StateField::SunEarthLine => "sunEarthLine",
            StateField::Latitude => "latitude",
            StateField::Longitude => "longitude",
            StateField::SunrayColor => "sunrayColor",
            StateField::GroundColor => "groundColor",
            StateField::SunrayDistMarker => "sunrayDistMarker",
            StateField::DailyRotation => "dailyRotation",
            StateField::EarthGridlines => "earthGridlines",
            StateField::Language => "language",
        }
    }
}

/// Partial update of [`SimulationState`]. Unset fields are left untouched.
///
/// Deserializing ignores unknown keys, so a malformed or foreign field name
/// in a JSON patch is dropped rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earth_tilt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earth_rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun_earth_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunray_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_color: Option<GroundColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunray_dist_marker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rotation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earth_gridlines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Locale>,
}

macro_rules! for_each_field {
    ($m:ident) => {
        $m!(
            day: Day,
            earth_tilt: EarthTilt,
            earth_rotation: EarthRotation,
            sun_earth_line: SunEarthLine,
            latitude: Latitude,
            longitude: Longitude,
            sunray_color: SunrayColor,
            ground_color: GroundColor,
            sunray_dist_marker: SunrayDistMarker,
            daily_rotation: DailyRotation,
            earth_gridlines: EarthGridlines,
            language: Language
        )
    };
}

impl StatePatch {
    pub fn day(day: f32) -> Self {
        Self { day: Some(day), ..Default::default() }
    }

    pub fn lat_long(latitude: f32, longitude: f32) -> Self {
        Self { latitude: Some(latitude), longitude: Some(longitude), ..Default::default() }
    }

    pub fn latitude(latitude: f32) -> Self {
        Self { latitude: Some(latitude), ..Default::default() }
    }

    pub fn earth_rotation(rotation: f32) -> Self {
        Self { earth_rotation: Some(rotation), ..Default::default() }
    }

    /// Fields set in this patch, in declaration order.
    pub fn fields(&self) -> Vec<StateField> {
        let mut out = Vec::new();
        let patch = self;
        macro_rules! collect {
            ($($f:ident: $v:ident),*) => {
                $(if patch.$f.is_some() { out.push(StateField::$v); })*
            };
        }
        for_each_field!(collect);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    pub fn contains(&self, field: StateField) -> bool {
        self.fields().contains(&field)
    }

    /// Overlay `other` on top of `self`; `other` wins where both are set.
    pub fn merge(&mut self, other: &StatePatch) {
        let target = self;
        macro_rules! overlay {
            ($($f:ident: $v:ident),*) => {
                $(if other.$f.is_some() { target.$f = other.$f.clone(); })*
            };
        }
        for_each_field!(overlay);
    }

    /// Write the set fields into `state`, returning the fields whose value
    /// actually changed.
    pub fn apply_to(&self, state: &mut SimulationState) -> Vec<StateField> {
        let mut changed = Vec::new();
        let patch = &self.finite_only();
        macro_rules! assign {
            ($($f:ident: $v:ident),*) => {
                $(if let Some(value) = &patch.$f {
                    if state.$f != *value {
                        state.$f = value.clone();
                        changed.push(StateField::$v);
                    }
                })*
            };
        }
        for_each_field!(assign);
        changed
    }

    /// Copy without NaN or infinite numbers. Those are dropped like unknown
    /// fields, so the previous value stays.
    pub fn finite_only(&self) -> StatePatch {
        let keep = |value: Option<f32>| value.filter(|v| v.is_finite());
        StatePatch {
            day: keep(self.day),
            earth_rotation: keep(self.earth_rotation),
            latitude: keep(self.latitude),
            longitude: keep(self.longitude),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let c: Color = "#D8D8AC".parse().unwrap();
        assert_eq!(c, Color::rgb(0xd8, 0xd8, 0xac));
        assert_eq!(c.to_string(), "#d8d8ac");
        assert!("#12345".parse::<Color>().is_err());
        assert!("zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_ground_color_serde() {
        let auto: GroundColor = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(auto, GroundColor::Auto);
        let fixed: GroundColor = serde_json::from_str("\"#102030\"").unwrap();
        assert_eq!(fixed, GroundColor::Fixed(Color::rgb(0x10, 0x20, 0x30)));
        assert_eq!(serde_json::to_string(&GroundColor::Auto).unwrap(), "\"auto\"");
    }

    #[test]
    fn test_ground_color_auto_follows_season() {
        let winter = GroundColor::Auto.resolve(5.0);
        let summer = GroundColor::Auto.resolve(180.0);
        assert_ne!(winter, summer);
        assert!(summer.0[1] > summer.0[0]);
        let fixed = Color::rgb(1, 2, 3);
        assert_eq!(GroundColor::Fixed(fixed).resolve(100.0), fixed);
    }

    #[test]
    fn test_state_json_uses_camel_case() {
        let json = serde_json::to_value(SimulationState::default()).unwrap();
        assert!(json.get("earthTilt").is_some());
        assert!(json.get("sunrayDistMarker").is_some());
        assert_eq!(json["language"], "en-us");
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch: StatePatch =
            serde_json::from_str(r#"{"day": 12.5, "bogusField": 3, "camera": {"x": 1}}"#).unwrap();
        assert_eq!(patch.day, Some(12.5));
        assert_eq!(patch.fields(), vec![StateField::Day]);
    }

    #[test]
    fn test_apply_reports_only_changes() {
        let mut state = SimulationState::default();
        let patch = StatePatch {
            day: Some(state.day),
            latitude: Some(10.0),
            ..Default::default()
        };
        let changed = patch.apply_to(&mut state);
        assert_eq!(changed, vec![StateField::Latitude]);
        assert_eq!(state.latitude, 10.0);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut a = StatePatch::day(10.0);
        a.merge(&StatePatch { day: Some(20.0), earth_tilt: Some(false), ..Default::default() });
        assert_eq!(a.day, Some(20.0));
        assert_eq!(a.earth_tilt, Some(false));
    }

    #[test]
    fn test_diff() {
        let a = SimulationState::default();
        let mut b = a.clone();
        b.longitude = 12.0;
        b.language = Locale::Es;
        let diff = a.diff(&b);
        assert_eq!(diff.fields(), vec![StateField::Longitude, StateField::Language]);
        assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn test_normalize() {
        let mut s = SimulationState {
            day: -1.0,
            latitude: 95.0,
            longitude: 200.0,
            earth_rotation: -0.5,
            ..Default::default()
        };
        s.normalize();
        assert!((s.day - 364.0).abs() < 1e-4);
        assert_eq!(s.latitude, 90.0);
        assert!((s.longitude + 160.0).abs() < 1e-4);
        assert!((s.earth_rotation - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_patch_values_are_dropped() {
        let patch: StatePatch = serde_json::from_str(r#"{"day": 1e39, "latitude": 12.5}"#).unwrap();
        assert_eq!(patch.day, Some(f32::INFINITY));

        let mut s = SimulationState::default();
        let before = s.day;
        let changed = patch.apply_to(&mut s);
        assert_eq!(changed, vec![StateField::Latitude]);
        assert_eq!(s.day, before);

        let patch = StatePatch { earth_rotation: Some(f32::NAN), longitude: Some(f32::NEG_INFINITY), ..Default::default() };
        assert!(patch.apply_to(&mut s).is_empty());
        assert!(s.earth_rotation.is_finite() && s.longitude.is_finite());
    }

    #[test]
    fn test_normalize_replaces_non_finite() {
        let mut s = SimulationState {
            day: f32::NAN,
            earth_rotation: f32::INFINITY,
            latitude: f32::NAN,
            longitude: f32::NEG_INFINITY,
            ..Default::default()
        };
        s.normalize();
        let defaults = SimulationState::default();
        assert_eq!(s.day, defaults.day);
        assert_eq!(s.earth_rotation, defaults.earth_rotation);
        assert_eq!(s.latitude, defaults.latitude);
        assert_eq!(s.longitude, defaults.longitude);
    }

    #[test]
    fn test_tilt_switch() {
        let mut s = SimulationState::default();
        assert!(s.tilt_radians() > 0.4);
        s.earth_tilt = false;
        assert_eq!(s.tilt_radians(), 0.0);
        assert_eq!(s.tilt_degrees(), 0.0);
    }
}
