use egui::{Pos2, Vec2};
use log::{debug, info};

use crate::command::HistorySnapshot;
use crate::element::{
    ElementType, ImageObject, ObjectMeta, Renderable, Selectable, TextObject, Transformable,
};
use crate::error::{CanvasError, CanvasResult};
use crate::object_table::{ObjectId, ObjectTable};
use crate::renderer::CanvasRenderer;
use crate::transform::GridView;

/// Everything placed on the canvas plus the view onto it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    objects: ObjectTable<ElementType>,
    /// Next default z-order; grows with every added object.
    next_upload_order: i64,
    view: GridView,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &GridView {
        &self.view
    }

    pub fn objects(&self) -> &ObjectTable<ElementType> {
        &self.objects
    }

    pub fn next_upload_order(&self) -> i64 {
        self.next_upload_order
    }

    /// Looks up an object, whether or not it is still open.
    pub fn get(&self, id: ObjectId) -> Option<&ElementType> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ElementType> {
        self.objects.get_mut(id)
    }

    /// Looks up an object that has not been deleted.
    pub fn open(&self, id: ObjectId) -> CanvasResult<&ElementType> {
        self.objects
            .get(id)
            .filter(|object| object.is_open())
            .ok_or(CanvasError::UnknownObject(id))
    }

    pub fn open_mut(&mut self, id: ObjectId) -> CanvasResult<&mut ElementType> {
        self.objects
            .get_mut(id)
            .filter(|object| object.is_open())
            .ok_or(CanvasError::UnknownObject(id))
    }

    pub fn image_mut(&mut self, id: ObjectId) -> CanvasResult<&mut ImageObject> {
        match self.open_mut(id)? {
            ElementType::Image(image) => Ok(image),
            ElementType::Text(_) => Err(CanvasError::Unsupported {
                operation: "edit pixels of",
                element_type: "text",
            }),
        }
    }

    /// Open objects, in no particular order.
    pub fn iter_open(&self) -> impl Iterator<Item = (ObjectId, &ElementType)> {
        self.objects.iter().filter(|(_, object)| object.is_open())
    }

    pub fn len(&self) -> usize {
        self.iter_open().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn image_count(&self) -> usize {
        self.iter_open()
            .filter(|(_, object)| matches!(object, ElementType::Image(_)))
            .count()
    }

    pub fn text_count(&self) -> usize {
        self.iter_open()
            .filter(|(_, object)| matches!(object, ElementType::Text(_)))
            .count()
    }

    /// Places an image with its top-left corner at a screen position and
    /// uploads its texture.
    pub fn add_image(
        &mut self,
        mut image: ImageObject,
        screen_pos: Pos2,
        renderer: &mut dyn CanvasRenderer,
    ) -> ObjectId {
        image.set_texture(None);
        image.upload(renderer);
        info!("Adding image '{}' at {:?}", image.name(), screen_pos);
        self.insert(ElementType::Image(image), screen_pos)
    }

    /// Places text with its top-left corner at a screen position.
    pub fn add_text(&mut self, text: TextObject, screen_pos: Pos2) -> ObjectId {
        info!("Adding text {:?} at {:?}", text.content(), screen_pos);
        self.insert(ElementType::Text(text), screen_pos)
    }

    fn insert(&mut self, mut object: ElementType, screen_pos: Pos2) -> ObjectId {
        object
            .placement_mut()
            .jump_to(self.view.screen_to_grid(screen_pos));
        *object.meta_mut() = ObjectMeta::new(self.take_upload_order());
        self.objects.insert(object)
    }

    fn take_upload_order(&mut self) -> i64 {
        let order = self.next_upload_order;
        self.next_upload_order += 1;
        order
    }

    /// Copies an object, shifted by `offset` screen pixels, on top of
    /// everything else. The copy is not selected and not erasing.
    pub fn duplicate(
        &mut self,
        id: ObjectId,
        offset: f32,
        renderer: &mut dyn CanvasRenderer,
    ) -> CanvasResult<ObjectId> {
        let mut copy = self.open(id)?.clone();

        let delta = self.view.screen_delta_to_grid(Vec2::splat(offset));
        copy.placement_mut().translate(delta);
        copy.set_selected(false);
        copy.meta_mut().z_order = self.take_upload_order();

        if let ElementType::Image(image) = &mut copy {
            image.set_eraser_mode(false);
            image.set_texture(None);
            image.upload(renderer);
        }

        let copy_id = self.objects.insert(copy);
        debug!("Duplicated {} as {}", id, copy_id);
        Ok(copy_id)
    }

    /// Marks an object deleted. It disappears at the next [`Document::compact`].
    pub fn remove(&mut self, id: ObjectId) -> CanvasResult<()> {
        let object = self.open_mut(id)?;
        object.set_selected(false);
        object.meta_mut().open = false;
        debug!("Removed {}", id);
        Ok(())
    }

    /// Drops deleted objects and releases their textures.
    ///
    /// Returns the ids that became invalid.
    pub fn compact(&mut self, renderer: &mut dyn CanvasRenderer) -> Vec<ObjectId> {
        let dropped: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, object)| !object.is_open())
            .map(|(id, _)| id)
            .collect();
        for &id in &dropped {
            let texture = self
                .objects
                .remove(id)
                .and_then(|mut object| object.as_image_mut().and_then(ImageObject::take_texture));
            if let Some(texture) = texture {
                renderer.release_texture(texture);
            }
        }
        if !dropped.is_empty() {
            debug!("Compacted {} object(s)", dropped.len());
        }
        dropped
    }

    /// Puts an object below every other object.
    pub fn bring_to_back(&mut self, id: ObjectId) -> CanvasResult<()> {
        self.open(id)?;
        let lowest = self
            .iter_open()
            .map(|(_, object)| object.z_order())
            .min()
            .unwrap_or(0);
        self.open_mut(id)?.meta_mut().z_order = lowest - 1;
        Ok(())
    }

    /// Selects one object and deselects (and stops erasing on) the rest.
    pub fn set_selected(&mut self, id: ObjectId) -> CanvasResult<()> {
        self.open(id)?;
        for (other, object) in self.objects.iter_mut() {
            if other != id {
                object.set_selected(false);
            }
        }
        self.open_mut(id)?.set_selected(true);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for (_, object) in self.objects.iter_mut() {
            object.set_selected(false);
        }
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.iter_open()
            .find(|(_, object)| object.is_selected())
            .map(|(id, _)| id)
    }

    /// Topmost open object whose bounding box contains a screen point.
    pub fn topmost_at(&self, screen: Pos2) -> Option<ObjectId> {
        self.iter_open()
            .filter(|(_, object)| object.bounding_box(&self.view).contains(screen))
            .max_by_key(|(_, object)| object.z_order())
            .map(|(id, _)| id)
    }

    /// Open objects from bottom to top.
    pub fn draw_order(&self) -> Vec<ObjectId> {
        let mut order: Vec<(i64, ObjectId)> = self
            .iter_open()
            .map(|(id, object)| (object.z_order(), id))
            .collect();
        order.sort_by_key(|(z, _)| *z);
        order.into_iter().map(|(_, id)| id).collect()
    }

    pub fn render(&self, renderer: &mut dyn CanvasRenderer) {
        for id in self.draw_order() {
            if let Some(object) = self.objects.get(id) {
                object.render(&self.view, renderer);
            }
        }
    }

    /// Zooms the grid and every object about a screen point.
    ///
    /// The factor is limited so that neither the grid nor any object leaves
    /// its zoom range, keeping everything in proportion. Returns the factor
    /// actually applied.
    pub fn zoom_view(&mut self, anchor: Pos2, factor: f32) -> f32 {
        let (view_low, view_high) = self.view.factor_bounds();
        let (low, high) = self.object_factor_bounds();
        let (low, high) = (low.max(view_low), high.min(view_high));
        if low > high {
            debug!("Grid zoom blocked: zoom limits do not overlap");
            return 1.0;
        }

        let applied = factor.clamp(low, high);
        if applied == 1.0 {
            if factor != 1.0 {
                debug!("Grid zoom by {} blocked by object zoom limits", factor);
            }
            return 1.0;
        }

        self.view.zoom_about(anchor, applied);
        for (_, object) in self.objects.iter_mut() {
            let level = object.zoom_level();
            object.set_zoom_level(level * applied);
        }
        applied
    }

    /// Range of factors every open object can be zoomed by together.
    fn object_factor_bounds(&self) -> (f32, f32) {
        self.iter_open()
            .fold((0.0, f32::INFINITY), |(low, high), (_, object)| {
                let level = object.zoom_level();
                let (min, max) = object.zoom_bounds();
                (low.max(min / level), high.min(max / level))
            })
    }

    pub fn pan_view(&mut self, delta: Vec2) {
        self.view.pan(delta);
    }

    /// Moves every object one easing step. Returns true while any is moving.
    pub fn advance_easing(&mut self, factor: f32) -> bool {
        let mut moving = false;
        for (_, object) in self.objects.iter_mut() {
            moving |= object.ease_toward_target(factor);
        }
        moving
    }

    /// Deep copy of the open objects without renderer resources.
    pub fn snapshot(&self) -> HistorySnapshot {
        let mut objects = self.objects.clone();
        objects.retain(|_, object| object.is_open());
        for (_, object) in objects.iter_mut() {
            if let Some(image) = object.as_image_mut() {
                image.set_texture(None);
            }
        }

        HistorySnapshot {
            objects,
            next_upload_order: self.next_upload_order,
            view: self.view,
        }
    }

    /// Replaces the objects with a snapshot's.
    ///
    /// The current view is kept; object zoom levels are re-projected if the
    /// grid scale changed since the snapshot was taken. When that would push
    /// an object past its zoom limits, the grid zoom is reduced instead.
    /// Every current texture is released and every restored image uploaded
    /// again.
    pub fn restore(&mut self, snapshot: HistorySnapshot, renderer: &mut dyn CanvasRenderer) {
        self.release_textures(renderer);

        self.objects.restore_entries(snapshot.objects);
        self.next_upload_order = snapshot.next_upload_order;

        let wanted = self.view.scale / snapshot.view.scale;
        let mut ratio = wanted;
        if ratio != 1.0 {
            let (low, high) = self.object_factor_bounds();
            if low <= high {
                ratio = ratio.clamp(low, high);
            }
            if ratio != wanted {
                // objects and grid must stay in proportion
                self.view.zoom_about(Pos2::ZERO, ratio / wanted);
            }
            debug!("Re-projecting restored objects by {}", ratio);
        }
        for (_, object) in self.objects.iter_mut() {
            if ratio != 1.0 {
                let level = object.zoom_level();
                object.set_zoom_level(level * ratio);
            }
            if let Some(image) = object.as_image_mut() {
                image.upload(renderer);
            }
        }
    }

    /// Removes every object and resets the upload counter. The view stays.
    pub fn clear(&mut self, renderer: &mut dyn CanvasRenderer) {
        self.release_textures(renderer);
        self.objects.clear();
        self.next_upload_order = 0;
        info!("Cleared canvas");
    }

    fn release_textures(&mut self, renderer: &mut dyn CanvasRenderer) {
        for (_, object) in self.objects.iter_mut() {
            if let Some(texture) = object.as_image_mut().and_then(ImageObject::take_texture) {
                renderer.release_texture(texture);
            }
        }
    }
}
