//! Headless render surfaces.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Mat4, Vec2};
use serde::Serialize;

use crate::core::camera::Camera;
use crate::scene::SceneObject;

/// Host panel a view is mounted in. Clones share the same size, so the host
/// can resize a panel and the view reads the new size on its next
/// [`resize`](crate::view::View::resize).
#[derive(Clone, Debug, Default)]
pub struct ContainerHandle {
    size: Rc<Cell<(u32, u32)>>,
}

impl ContainerHandle {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: Rc::new(Cell::new((width, height))) }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set((width, height));
    }

    pub fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    pub fn is_empty(&self) -> bool {
        let (w, h) = self.size();
        w == 0 || h == 0
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawItem {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip)]
    pub world: Mat4,
    /// Pixel position of the primitive's origin; `None` when behind the camera.
    pub screen: Option<[f32; 2]>,
    pub color: [f32; 3],
    pub highlighted: bool,
}

impl DrawItem {
    pub fn screen_position(&self) -> Option<Vec2> {
        self.screen.map(Vec2::from)
    }
}

/// Render target of a 3D view. Painting records visible primitives as a
/// draw list instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RenderSurface {
    width: u32,
    height: u32,
    frame: Vec<DrawItem>,
    frames_painted: u64,
}

impl RenderSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize. Zero sizes are ignored. Returns whether the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Record every visible primitive of `objects` as seen by `camera`.
    pub fn paint(&mut self, camera: &Camera, objects: &[&dyn SceneObject]) {
        let (w, h) = (self.width as f32, self.height as f32);
        self.frame.clear();
        for object in objects {
            for primitive in object.primitives() {
                if !primitive.visible {
                    continue;
                }
                let world = primitive.world_matrix();
                let origin = world.w_axis.truncate();
                self.frame.push(DrawItem {
                    name: primitive.name.clone(),
                    kind: primitive.kind.name(),
                    world,
                    screen: camera.project(origin, w, h).map(|(x, y)| [x, y]),
                    color: primitive.color,
                    highlighted: primitive.is_highlighted(),
                });
            }
        }
        self.frames_painted += 1;
    }

    /// Draw list of the last painted frame.
    pub fn frame(&self) -> &[DrawItem] {
        &self.frame
    }

    pub fn find(&self, name: &str) -> Option<&DrawItem> {
        self.frame.iter().find(|item| item.name == name)
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }
}
