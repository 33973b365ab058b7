//! Per-chart hover state.
//!
//! A chart is either idle or hovering exactly one element. The host forwards
//! pointer events for element hit regions and for the tooltip box; the model
//! decides which element is highlighted and whether its tooltip is shown.
//!
//! Hovering stays active while the pointer is over the element *or* its
//! tooltip, so moving from a segment onto its tooltip does not flicker.
//! Leave events only mark the hover as pending; the host calls
//! [`HoverModel::settle`] once after dispatching each batch of pointer
//! events, and only then does a hover with nothing under the pointer end.
//! The order of leave and enter events within a batch does not matter.

use super::style::{DEFAULT_DIMMED_OPACITY, FULL_OPACITY};
use std::fmt::Debug;

/// Identifies one segment of one stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackedKey {
    pub bar: usize,
    pub segment: usize,
}

impl StackedKey {
    pub const fn new(bar: usize, segment: usize) -> Self {
        Self { bar, segment }
    }
}

/// Observable hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState<K> {
    Idle,
    Hovering(K),
}

/// A change of the hovered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition<K> {
    /// Idle to hovering
    Entered(K),
    /// Straight from one element to another, with no idle frame between
    Switched { from: K, to: K },
    /// Hovering to idle
    Left(K),
}

/// Hover state machine for one chart instance.
///
/// `K` is the element key: a segment or point index for simple charts,
/// [`StackedKey`] for stacked bars.
#[derive(Debug, Clone)]
pub struct HoverModel<K = usize> {
    current: Option<K>,
    over_element: bool,
    over_tooltip: bool,
    dimmed_opacity: f32,
}

impl<K> Default for HoverModel<K> {
    fn default() -> Self {
        Self {
            current: None,
            over_element: false,
            over_tooltip: false,
            dimmed_opacity: DEFAULT_DIMMED_OPACITY,
        }
    }
}

impl<K: Copy + PartialEq + Debug> HoverModel<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opacity of non-hovered elements, clamped into `0..=1`.
    pub fn with_dimmed_opacity(mut self, opacity: f32) -> Self {
        self.dimmed_opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_DIMMED_OPACITY
        };
        self
    }

    pub fn dimmed_opacity(&self) -> f32 {
        self.dimmed_opacity
    }

    /// The pointer entered the hit region of `id`.
    pub fn on_enter(&mut self, id: K) -> Option<HoverTransition<K>> {
        self.over_element = true;
        let transition = match self.current {
            Some(current) if current == id => return None,
            Some(from) => {
                // The previous element's tooltip belongs to `from`.
                self.over_tooltip = false;
                HoverTransition::Switched { from, to: id }
            }
            None => HoverTransition::Entered(id),
        };
        self.current = Some(id);
        tracing::debug!("Hover transition: {:?}", transition);
        Some(transition)
    }

    /// The pointer left the hovered element's hit region.
    ///
    /// The hover stays until [`settle`](Self::settle) unless the pointer
    /// reaches the tooltip or the element again first.
    pub fn on_leave(&mut self) {
        self.over_element = false;
    }

    /// The pointer entered the tooltip of the hovered element.
    ///
    /// Ignored while idle.
    pub fn on_tooltip_enter(&mut self) {
        if self.current.is_some() {
            self.over_tooltip = true;
        }
    }

    /// The pointer left the tooltip. Pending like [`on_leave`](Self::on_leave).
    pub fn on_tooltip_leave(&mut self) {
        self.over_tooltip = false;
    }

    /// Drop any hover immediately, e.g. when the chart's data is replaced.
    pub fn reset(&mut self) -> Option<HoverTransition<K>> {
        self.over_element = false;
        self.over_tooltip = false;
        self.settle()
    }

    /// End the hover if the pointer is over neither the element nor its
    /// tooltip.
    pub fn settle(&mut self) -> Option<HoverTransition<K>> {
        if self.over_element || self.over_tooltip {
            return None;
        }
        let left = self.current.take()?;
        let transition = HoverTransition::Left(left);
        tracing::debug!("Hover transition: {:?}", transition);
        Some(transition)
    }

    /// Whether a leave is waiting for [`settle`](Self::settle).
    pub fn is_leave_pending(&self) -> bool {
        self.current.is_some() && !self.over_element && !self.over_tooltip
    }

    /// The hovered element, if any.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    pub fn state(&self) -> HoverState<K> {
        match self.current {
            Some(id) => HoverState::Hovering(id),
            None => HoverState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_hovered(&self, id: K) -> bool {
        self.current == Some(id)
    }

    /// Render opacity of element `id`.
    ///
    /// Full while idle and for the hovered element, dimmed for the rest.
    pub fn opacity_for(&self, id: K) -> f32 {
        match self.current {
            Some(current) if current != id => self.dimmed_opacity,
            _ => FULL_OPACITY,
        }
    }

    /// Whether the tooltip of `id` is visible.
    pub fn shows_tooltip(&self, id: K) -> bool {
        self.is_hovered(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_full_opacity() {
        let model: HoverModel = HoverModel::new();
        assert_eq!(model.state(), HoverState::Idle);
        assert_eq!(model.opacity_for(0), FULL_OPACITY);
        assert!(!model.shows_tooltip(0));
    }

    #[test]
    fn test_enter_and_leave() {
        let mut model: HoverModel = HoverModel::new();
        assert_eq!(model.on_enter(1), Some(HoverTransition::Entered(1)));
        assert_eq!(model.on_enter(1), None);
        assert_eq!(model.opacity_for(0), DEFAULT_DIMMED_OPACITY);
        assert_eq!(model.opacity_for(1), FULL_OPACITY);
        assert!(model.shows_tooltip(1));

        model.on_leave();
        assert!(model.is_leave_pending());
        assert_eq!(model.settle(), Some(HoverTransition::Left(1)));
        assert!(model.is_idle());
        assert_eq!(model.settle(), None);
    }

    #[test]
    fn test_settle_keeps_hover_under_pointer() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(4);
        assert_eq!(model.settle(), None);
        assert_eq!(model.state(), HoverState::Hovering(4));
        assert!(!model.is_leave_pending());
    }

    #[test]
    fn test_direct_switch() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(1);
        assert_eq!(
            model.on_enter(2),
            Some(HoverTransition::Switched { from: 1, to: 2 })
        );
        assert_eq!(model.current(), Some(2));
    }

    #[test]
    fn test_leave_then_switch_skips_idle() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(1);
        model.on_leave();
        assert_eq!(
            model.on_enter(2),
            Some(HoverTransition::Switched { from: 1, to: 2 })
        );
        assert_eq!(model.settle(), None);
    }

    #[test]
    fn test_tooltip_keeps_hover_alive() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(0);
        model.on_tooltip_enter();
        model.on_leave();
        assert_eq!(model.settle(), None);
        assert_eq!(model.current(), Some(0));
        model.on_tooltip_leave();
        assert_eq!(model.settle(), Some(HoverTransition::Left(0)));
    }

    #[test]
    fn test_element_leave_before_tooltip_enter() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(1);
        model.on_leave();
        model.on_tooltip_enter();
        assert_eq!(model.settle(), None);
        assert_eq!(model.state(), HoverState::Hovering(1));
        assert!(model.shows_tooltip(1));
    }

    #[test]
    fn test_tooltip_leave_back_onto_element() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(1);
        model.on_leave();
        model.on_tooltip_enter();
        model.on_tooltip_leave();
        assert_eq!(model.on_enter(1), None);
        assert_eq!(model.settle(), None);
        assert_eq!(model.state(), HoverState::Hovering(1));
    }

    #[test]
    fn test_tooltip_enter_while_idle_is_ignored() {
        let mut model: HoverModel = HoverModel::new();
        model.on_tooltip_enter();
        model.on_enter(3);
        model.on_leave();
        assert_eq!(model.settle(), Some(HoverTransition::Left(3)));
    }

    #[test]
    fn test_stacked_keys() {
        let mut model = HoverModel::<StackedKey>::new().with_dimmed_opacity(0.4);
        model.on_enter(StackedKey::new(0, 1));
        assert_eq!(model.opacity_for(StackedKey::new(0, 0)), 0.4);
        assert_eq!(model.opacity_for(StackedKey::new(0, 1)), FULL_OPACITY);
    }

    #[test]
    fn test_reset() {
        let mut model: HoverModel = HoverModel::new();
        model.on_enter(2);
        model.on_tooltip_enter();
        assert_eq!(model.reset(), Some(HoverTransition::Left(2)));
        assert!(model.is_idle());
    }
}
