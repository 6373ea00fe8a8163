use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Text shown on one wedge of the wheel.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

pub fn labels<I, S>(items: I) -> Vec<Label>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Label::new).collect()
}
