//! FlipView: the plain paged carousel, optionally looping.

use tileshell_motion_core::{ElementId, IdAllocator};

use crate::carousel::{Carousel, ChildTransform};
use crate::component::{Component, Slots, SLOT_VIEWPORT};
use crate::config::CarouselConfig;
use crate::element::ChildItem;
use crate::events::CarouselEvent;
use crate::gesture::{GestureOutcome, PointerInput};
use crate::layout::Placement;
use crate::Result;

pub struct FlipView {
    carousel: Carousel,
    slots: Slots,
}

impl FlipView {
    pub fn new(config: CarouselConfig, ids: &mut IdAllocator) -> Self {
        Self {
            carousel: Carousel::new(config),
            slots: Slots::allocate(ids, &[SLOT_VIEWPORT]),
        }
    }

    pub fn set_items(&mut self, items: Vec<ChildItem>) {
        self.carousel.set_children(items);
    }

    pub fn resize(&mut self, extent: f64) -> Result<()> {
        self.carousel.resize(extent)
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.carousel.set_scroll_offset(offset);
    }

    pub fn layout(&mut self) -> &[Placement] {
        self.carousel.layout()
    }

    pub fn transforms(&self) -> Vec<ChildTransform> {
        self.carousel.transforms()
    }

    pub fn snap_to_nearest(&mut self) -> f64 {
        self.carousel.snap_to_nearest()
    }

    pub fn target_offset(&self) -> f64 {
        self.carousel.target_offset()
    }

    pub fn go_to(&mut self, index: usize) -> Result<f64> {
        self.carousel.go_to(index)
    }

    pub fn next(&mut self) -> f64 {
        self.carousel.step(1)
    }

    pub fn previous(&mut self) -> f64 {
        self.carousel.step(-1)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.carousel.selected_index()
    }

    pub fn selected_item(&self) -> Option<&ChildItem> {
        self.selected_index()
            .and_then(|index| self.carousel.children().get(index))
    }

    pub fn pointer(&mut self, input: &PointerInput) -> GestureOutcome {
        self.carousel.pointer(input)
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.carousel.tick(now_ms)
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        self.carousel.drain_events()
    }
}

impl Component for FlipView {
    fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    fn slot(&self, name: &str) -> Option<ElementId> {
        self.slots.get(name)
    }
}
