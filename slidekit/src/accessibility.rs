//! AccessKit integration.
//!
//! Every thumb is exposed as its own [`Role::Slider`] node. Assistive
//! technology requests are mapped back onto the slider's commit path through
//! [`crate::Slider::accessibility_action`].

use accesskit::{Action, ActionData, Node, Role};

use crate::{
    config::Orientation,
    render_sync::ViewState,
    state::ThumbIndex,
};

/// A request from assistive technology, already decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccessibilityRequest {
    /// Move by a number of steps.
    Step(i32),
    /// Commit an explicit value.
    SetValue(f64),
}

impl AccessibilityRequest {
    /// Decodes an AccessKit action. Unsupported actions, and `SetValue`
    /// without numeric data, yield `None`.
    pub fn from_action(action: Action, data: Option<&ActionData>) -> Option<Self> {
        match (action, data) {
            (Action::Increment, _) => Some(Self::Step(1)),
            (Action::Decrement, _) => Some(Self::Step(-1)),
            (Action::SetValue, Some(ActionData::NumericValue(value))) => {
                Some(Self::SetValue(*value))
            }
            _ => None,
        }
    }
}

/// Builds the AccessKit node of one thumb, or `None` when the view has no
/// such thumb.
pub fn thumb_node(view: &ViewState, thumb: ThumbIndex) -> Option<Node> {
    let thumb_view = view.thumbs.iter().find(|candidate| candidate.index == thumb)?;

    let mut node = Node::new(Role::Slider);
    if let Some(label) = &thumb_view.aria_label {
        node.set_label(label.clone());
    }
    node.set_value(thumb_view.value_text.clone());
    node.set_numeric_value(thumb_view.value_now);
    node.set_min_numeric_value(thumb_view.value_min);
    node.set_max_numeric_value(thumb_view.value_max);
    if let Some(step) = view.step {
        node.set_numeric_value_step(step);
    }
    node.set_orientation(match view.orientation {
        Orientation::Horizontal => accesskit::Orientation::Horizontal,
        Orientation::Vertical => accesskit::Orientation::Vertical,
    });

    if view.disabled {
        node.set_disabled();
    } else {
        node.add_action(Action::Focus);
        node.add_action(Action::Increment);
        node.add_action(Action::Decrement);
        node.add_action(Action::SetValue);
    }
    Some(node)
}
