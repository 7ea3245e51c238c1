//! Flat sunray diagrams.
//!
//! Both diagrams show the noon sunray angle for the current day, tilt and
//! latitude. They redraw only when a watched field changes and are not part
//! of the per-frame tick.

pub mod canvas;
pub mod ground;
pub mod space;

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::astro::is_polar_night;
use crate::core::input::PointerEvent;
use crate::core::types::Result;
use crate::i18n::translate;
use crate::state::{Color, SimulationState, StateField, StatePatch, ViewKind};

use super::hooks::{dispatch_in_place, Hook, HookTable};
use super::surface::ContainerHandle;
use super::{View, ViewEvent};

/// Inputs of one diagram render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramParams {
    pub angle_degrees: f32,
    pub sunray_color: Color,
    pub ground_color: Color,
    pub dist_marker: bool,
}

impl DiagramParams {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            angle_degrees: state.sunray_angle(),
            sunray_color: state.sunray_color,
            ground_color: state.ground_color.resolve(state.day),
            dist_marker: state.sunray_dist_marker,
        }
    }

    pub fn is_polar_night(&self) -> bool {
        is_polar_night(self.angle_degrees)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Perspective {
    /// Flat ground, angled rays.
    Ground,
    /// Vertical rays, rotated ground.
    Space,
}

/// Fields that change the drawing.
const WATCHED: [StateField; 6] = [
    StateField::Day,
    StateField::EarthTilt,
    StateField::Latitude,
    StateField::SunrayColor,
    StateField::GroundColor,
    StateField::SunrayDistMarker,
];

fn mark_dirty(view: &mut RaysView, _: &SimulationState) {
    view.dirty = true;
}

pub struct RaysView {
    perspective: Perspective,
    container: ContainerHandle,
    image: RgbaImage,
    state: SimulationState,
    hooks: HookTable<RaysView>,
    dirty: bool,
    renders: u64,
    torn_down: bool,
}

impl RaysView {
    pub fn new(perspective: Perspective, container: ContainerHandle, initial: &SimulationState) -> Self {
        let hooks = WATCHED
            .into_iter()
            .fold(HookTable::new(), |table, field| table.on(field, mark_dirty as Hook<RaysView>));
        let (width, height) = container.size();
        let mut view = Self {
            perspective,
            container,
            image: RgbaImage::new(width, height),
            state: initial.clone(),
            hooks,
            dirty: true,
            renders: 0,
            torn_down: false,
        };
        log::info!("Created {:?} rays view ({}x{})", perspective, width, height);
        view.render();
        view
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Last rendered diagram.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Number of completed renders.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn is_polar_night(&self) -> bool {
        DiagramParams::from_state(&self.state).is_polar_night()
    }

    /// Label shown under the diagram.
    pub fn caption(&self) -> String {
        let language = self.state.language;
        if self.is_polar_night() {
            translate("~POLAR_NIGHT", language).to_string()
        } else {
            format!("{}: {:.1}°", translate("~SUNRAY_ANGLE", language), self.state.sunray_angle())
        }
    }

    /// Encode the current diagram as PNG.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            self.image.as_raw(),
            self.image.width(),
            self.image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(png)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.png_bytes()?)?;
        log::info!("Saved {:?} diagram to {}", self.perspective, path.as_ref().display());
        Ok(())
    }

    fn render(&mut self) {
        if self.torn_down || self.image.width() == 0 || self.image.height() == 0 {
            return;
        }
        let params = DiagramParams::from_state(&self.state);
        match self.perspective {
            Perspective::Ground => ground::draw(&mut self.image, &params),
            Perspective::Space => space::draw(&mut self.image, &params),
        }
        self.dirty = false;
        self.renders += 1;
        log::debug!("{:?} diagram rendered at {:.2} degrees", self.perspective, params.angle_degrees);
    }
}

impl View for RaysView {
    fn kind(&self) -> ViewKind {
        match self.perspective {
            Perspective::Ground => ViewKind::GroundRays,
            Perspective::Space => ViewKind::SpaceRays,
        }
    }

    fn apply_state_patch(&mut self, patch: &StatePatch) {
        if self.torn_down {
            return;
        }
        let changed = patch.apply_to(&mut self.state);
        let state = self.state.clone();
        dispatch_in_place(self, |v| &mut v.hooks, &changed, &state);
        if self.dirty {
            self.render();
        }
    }

    fn update(&mut self, _now_ms: f64) {}

    fn paint(&mut self) {
        if self.dirty {
            self.render();
        }
    }

    fn resize(&mut self) {
        if self.torn_down || self.container.is_empty() {
            return;
        }
        let (width, height) = self.container.size();
        if (width, height) == self.image.dimensions() {
            return;
        }
        self.image = RgbaImage::new(width, height);
        self.dirty = true;
        self.render();
    }

    fn pointer_event(&mut self, _event: &PointerEvent) {}

    fn drain_events(&mut self) -> Vec<ViewEvent> {
        Vec::new()
    }

    fn teardown(&mut self) {
        self.torn_down = true;
        log::info!("Tore down {:?} rays view", self.perspective);
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
