//! Transaction inputs.

use crate::primitives::{ObjectArg, ObjectId};
use crate::pure_value::PureType;

/// An input slot, referenced by commands through `Argument::Input(index)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Input {
    /// Encoded bytes of a non-object value, with the type they were encoded as
    Pure { ty: PureType, bytes: Vec<u8> },
    Object(ObjectArg),
}

impl Input {
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            Input::Object(arg) => Some(arg.id()),
            Input::Pure { .. } => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Input::Object(_))
    }
}

impl From<ObjectArg> for Input {
    fn from(arg: ObjectArg) -> Self {
        Input::Object(arg)
    }
}
