//! Viewing session: one model, one camera, one renderer

use crate::camera::{Camera, CameraUpdate, ScreenRect};
use crate::renderer::{RenderOptions, Renderer};
use crate::surface::PaintSurface;
use isoview_core::{Drawable, Group, GroupUpdate, SceneNode};
use isoview_io::{LoadError, LoaderRegistry, ObjectLoader};
use std::path::Path;

/// The model, camera and renderer of a single view.
///
/// Display attributes belong to the session rather than to a file: replacing
/// the model keeps the current model attributes and applies them to every node
/// of the new one.
pub struct Environment {
    model: Group,
    camera: Camera,
    renderer: Renderer,
    loader: Box<dyn ObjectLoader>,
}

impl Environment {
    /// Create an empty session using the default format registry
    pub fn new() -> Self {
        Self::with_loader(Box::new(LoaderRegistry::default()))
    }

    /// Create an empty session loading files through `loader`
    pub fn with_loader(loader: Box<dyn ObjectLoader>) -> Self {
        Self {
            model: Group::new(),
            camera: Camera::new(),
            renderer: Renderer::new(),
            loader,
        }
    }

    /// Load a model file, replacing the current model.
    ///
    /// On failure the current model is left unchanged.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let node = self.loader.load(path.as_ref())?;
        self.set_model(node);
        Ok(())
    }

    /// Replace the model with `node`, keeping the display attributes
    pub fn set_model(&mut self, node: SceneNode) {
        let attr = self.model.attributes();

        self.model.batch(|model| {
            match node {
                SceneNode::Group(group) => model.set(&group),
                point => model.set_list(vec![point]),
            }
            model.set_attributes_to_all(&attr);
        });

        self.camera
            .set_extents_max_range(self.model.extents_max_range());
    }

    /// Render the model with the current camera
    pub fn render(&mut self) -> Group {
        let scene = SceneNode::Group(self.model.clone());
        self.renderer.render(&scene, &self.camera)
    }

    /// Paint the last frame, then the camera status text
    pub fn paint(&self, surface: &mut dyn PaintSurface) {
        self.renderer.paint(surface);
        self.camera.paint(surface);
    }

    /// Zoom and pan so the model fills `rect`
    pub fn fit(&mut self, rect: &ScreenRect) {
        let scene = SceneNode::Group(self.model.clone());
        self.camera.zoom_to_fit(&scene, rect);
    }

    pub fn model(&self) -> &Group {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Group {
        &mut self.model
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn set_render_options(&mut self, options: RenderOptions) {
        self.renderer.set_options(options);
    }

    /// Register a listener for model changes
    pub fn add_model_listener(&mut self, listener: impl FnMut(GroupUpdate) + 'static) {
        self.model.add_listener(listener);
    }

    /// Register a listener for camera changes
    pub fn add_camera_listener(&mut self, listener: impl FnMut(CameraUpdate) + 'static) {
        self.camera.add_listener(listener);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
