use crate::error::UnknownAction;
use crate::markup::{ACCEPT_ATTR, CANCEL_ATTR, CLOSE_ATTR};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// The user's response to a dialog, as recorded in the decision store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalAction {
    Close,
    Accept,
    Cancel,
}

impl ModalAction {
    /// Order used when a control carries more than one response marker.
    pub const PRECEDENCE: [ModalAction; 3] =
        [ModalAction::Close, ModalAction::Cancel, ModalAction::Accept];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            ModalAction::Close => "close",
            ModalAction::Accept => "accept",
            ModalAction::Cancel => "cancel",
        }
    }

    /// Markup attribute that tags a control with this action.
    #[inline]
    pub fn marker_attr(self) -> &'static str {
        match self {
            ModalAction::Close => CLOSE_ATTR,
            ModalAction::Accept => ACCEPT_ATTR,
            ModalAction::Cancel => CANCEL_ATTR,
        }
    }

    /// Every response marker present on a control, in precedence order.
    pub fn markers(has_attr: impl Fn(&str) -> bool) -> SmallVec<[ModalAction; 3]> {
        Self::PRECEDENCE
            .iter()
            .copied()
            .filter(|a| has_attr(a.marker_attr()))
            .collect()
    }

    /// Classify a control by its markers; close wins over cancel, cancel over accept.
    pub fn classify(has_attr: impl Fn(&str) -> bool) -> Option<ModalAction> {
        Self::markers(has_attr).first().copied()
    }
}

impl fmt::Display for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(ModalAction::Close),
            "accept" => Ok(ModalAction::Accept),
            "cancel" => Ok(ModalAction::Cancel),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
