//! Widget compositor.
//!
//! A [`Scene`] owns up to [`MAX_SCENE_ASSETS`] widgets in a fixed slot
//! arena and hands out [`AssetId`] handles instead of references, which
//! is what lets callers keep a handle to a widget while the scene also
//! owns it. Handles stay valid until the widget is removed; a freed slot
//! is reused by later adds.
//!
//! # Draw Order
//!
//! [`Scene::draw_all`] renders in ascending z-index. Widgets sharing a
//! z-index draw in insertion order, which stays stable across removals
//! of other widgets because each widget carries the sequence number it
//! was inserted with.

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::config::MAX_SCENE_ASSETS;
use crate::surface::DrawSurface;
use crate::widgets::{Bitmap, DataPlot, FunctionPlot, Geometry, Table, TextBox};

/// Handle to a widget owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssetId(usize);

/// Owned widget, one variant per drawable type.
pub enum Widget {
    TextBox(TextBox),
    FunctionPlot(FunctionPlot),
    DataPlot(DataPlot),
    Table(Table),
    Geometry(Geometry),
    Bitmap(Bitmap),
}

macro_rules! widget_accessors {
    ($variant:ident, $type:ty, $ref_fn:ident, $mut_fn:ident) => {
        pub fn $ref_fn(&self) -> Option<&$type> {
            match self {
                Widget::$variant(inner) => Some(inner),
                _ => None,
            }
        }

        pub fn $mut_fn(&mut self) -> Option<&mut $type> {
            match self {
                Widget::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

impl Widget {
    fn as_asset(&self) -> &dyn Asset {
        match self {
            Widget::TextBox(w) => w,
            Widget::FunctionPlot(w) => w,
            Widget::DataPlot(w) => w,
            Widget::Table(w) => w,
            Widget::Geometry(w) => w,
            Widget::Bitmap(w) => w,
        }
    }

    fn as_asset_mut(&mut self) -> &mut dyn Asset {
        match self {
            Widget::TextBox(w) => w,
            Widget::FunctionPlot(w) => w,
            Widget::DataPlot(w) => w,
            Widget::Table(w) => w,
            Widget::Geometry(w) => w,
            Widget::Bitmap(w) => w,
        }
    }

    widget_accessors!(TextBox, TextBox, as_text_box, as_text_box_mut);
    widget_accessors!(FunctionPlot, FunctionPlot, as_function_plot, as_function_plot_mut);
    widget_accessors!(DataPlot, DataPlot, as_data_plot, as_data_plot_mut);
    widget_accessors!(Table, Table, as_table, as_table_mut);
    widget_accessors!(Geometry, Geometry, as_geometry, as_geometry_mut);
    widget_accessors!(Bitmap, Bitmap, as_bitmap, as_bitmap_mut);
}

// Manual impl: the wrapped widgets are not Debug, the kind tag is enough.
impl core::fmt::Debug for Widget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Widget").field(&self.kind()).finish()
    }
}

impl Asset for Widget {
    fn base(&self) -> &AssetBase {
        self.as_asset().base()
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        self.as_asset_mut().base_mut()
    }

    fn kind(&self) -> AssetKind {
        self.as_asset().kind()
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        self.as_asset_mut().draw(surface);
    }
}

impl From<TextBox> for Widget {
    fn from(widget: TextBox) -> Self {
        Widget::TextBox(widget)
    }
}

impl From<FunctionPlot> for Widget {
    fn from(widget: FunctionPlot) -> Self {
        Widget::FunctionPlot(widget)
    }
}

impl From<DataPlot> for Widget {
    fn from(widget: DataPlot) -> Self {
        Widget::DataPlot(widget)
    }
}

impl From<Table> for Widget {
    fn from(widget: Table) -> Self {
        Widget::Table(widget)
    }
}

impl From<Geometry> for Widget {
    fn from(widget: Geometry) -> Self {
        Widget::Geometry(widget)
    }
}

impl From<Bitmap> for Widget {
    fn from(widget: Bitmap) -> Self {
        Widget::Bitmap(widget)
    }
}

struct Slot {
    widget: Widget,
    /// Insertion sequence, tie-breaker for equal z-indices.
    seq: u32,
}

pub struct Scene {
    slots: [Option<Slot>; MAX_SCENE_ASSETS],
    next_seq: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; MAX_SCENE_ASSETS],
            next_seq: 0,
        }
    }

    /// Take ownership of a widget. Returns the widget unchanged when
    /// every slot is occupied.
    pub fn add(&mut self, widget: impl Into<Widget>) -> Result<AssetId, Widget> {
        let widget = widget.into();
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            return Err(widget);
        };
        self.slots[index] = Some(Slot {
            widget,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        Ok(AssetId(index))
    }

    /// Remove a widget, handing its ownership back. Stale handles
    /// return `None`.
    pub fn remove(&mut self, id: AssetId) -> Option<Widget> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::take)
            .map(|slot| slot.widget)
    }

    pub fn get(&self, id: AssetId) -> Option<&Widget> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|slot| &slot.widget)
    }

    pub fn get_mut(&mut self, id: AssetId) -> Option<&mut Widget> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.widget)
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub const fn capacity(&self) -> usize {
        MAX_SCENE_ASSETS
    }

    /// Draw every visible widget back-to-front. Hidden widgets are
    /// skipped here and animated widgets still advance only when they
    /// actually draw.
    pub fn draw_all(&mut self, surface: &mut dyn DrawSurface) {
        let mut order: heapless::Vec<(i16, u32, usize), MAX_SCENE_ASSETS> = heapless::Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(slot) = slot {
                order
                    .push((slot.widget.base().z_index(), slot.seq, index))
                    .ok();
            }
        }
        order.sort_unstable();

        for &(_, _, index) in &order {
            if let Some(slot) = self.slots[index].as_mut() {
                if slot.widget.base().is_visible() {
                    slot.widget.draw(surface);
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_surface::{DrawCall, RecordingSurface};

    fn marker(x: i16) -> Geometry {
        // Distinct filled rectangles, so the recorded x reveals draw order.
        Geometry::rectangle(x, 0, 1, 1, true)
    }

    fn drawn_xs(s: &RecordingSurface) -> Vec<i16> {
        s.calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect { x, filled: true, .. } => Some(*x),
                _ => None,
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Arena Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_get_remove_roundtrip() {
        let mut scene = Scene::new();
        let id = scene.add(TextBox::new(0, 0, 64, 12, "HI")).unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).unwrap().kind(), AssetKind::TextBox);

        let widget = scene.remove(id).unwrap();
        assert!(widget.as_text_box().is_some());
        assert!(scene.is_empty());
        assert!(scene.get(id).is_none(), "handle is stale after removal");
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn test_full_scene_returns_the_widget() {
        let mut scene = Scene::new();
        for i in 0..MAX_SCENE_ASSETS {
            assert!(scene.add(marker(i as i16)).is_ok());
        }
        let rejected = scene.add(marker(99));
        let Err(widget) = rejected else {
            panic!("add into a full scene must fail");
        };
        assert_eq!(widget.base().x(), 99, "caller gets the same widget back");
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut scene = Scene::new();
        let first = scene.add(marker(1)).unwrap();
        let _second = scene.add(marker(2)).unwrap();
        scene.remove(first);
        let third = scene.add(marker(3)).unwrap();
        assert_eq!(third, first, "first slot is reused");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_widget_debug_names_the_kind() {
        // unwrap() on Scene::add's Result needs this impl to build at all.
        let widget = Widget::from(TextBox::new(0, 0, 8, 8, ""));
        assert_eq!(format!("{widget:?}"), "Widget(TextBox)");
        let widget = Widget::from(Geometry::line(0, 0, 1, 1));
        assert_eq!(format!("{widget:?}"), "Widget(Geometry)");
    }

    #[test]
    fn test_get_mut_reaches_the_widget() {
        let mut scene = Scene::new();
        let id = scene.add(TextBox::new(0, 0, 64, 12, "OLD")).unwrap();
        scene
            .get_mut(id)
            .and_then(Widget::as_text_box_mut)
            .unwrap()
            .set_text("NEW");
        assert_eq!(scene.get(id).unwrap().as_text_box().unwrap().text(), "NEW");
    }

    // -------------------------------------------------------------------------
    // Draw Order Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_draw_all_orders_by_z_index() {
        let mut scene = Scene::new();
        let mut top = marker(2);
        top.base_mut().set_z_index(2);
        let mut bottom = marker(0);
        bottom.base_mut().set_z_index(0);
        let mut middle = marker(1);
        middle.base_mut().set_z_index(1);

        scene.add(top).unwrap();
        scene.add(bottom).unwrap();
        scene.add(middle).unwrap();

        let mut s = RecordingSurface::new(128, 64);
        scene.draw_all(&mut s);
        assert_eq!(drawn_xs(&s), [0, 1, 2], "ascending z regardless of add order");
    }

    #[test]
    fn test_equal_z_draws_in_insertion_order() {
        let mut scene = Scene::new();
        let first = scene.add(marker(10)).unwrap();
        scene.add(marker(20)).unwrap();
        scene.remove(first);
        // Reuses slot 0 but must still draw after the earlier widget.
        scene.add(marker(30)).unwrap();

        let mut s = RecordingSurface::new(128, 64);
        scene.draw_all(&mut s);
        assert_eq!(drawn_xs(&s), [20, 30], "insertion order survives slot reuse");
    }

    #[test]
    fn test_hidden_widgets_are_skipped() {
        let mut scene = Scene::new();
        let id = scene.add(marker(5)).unwrap();
        scene.get_mut(id).unwrap().base_mut().hide();

        let mut s = RecordingSurface::new(128, 64);
        scene.draw_all(&mut s);
        assert!(drawn_xs(&s).is_empty());
    }

    #[test]
    fn test_clear_empties_every_slot() {
        let mut scene = Scene::new();
        scene.add(marker(1)).unwrap();
        scene.add(marker(2)).unwrap();
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.capacity(), MAX_SCENE_ASSETS);
    }
}
