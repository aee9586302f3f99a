use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the field's default, same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Implements [`crate::store::Document`] for a record with an
/// `id: Option<String>` field.
macro_rules! impl_document {
    ($ty:ty, $collection:literal $(, indexed = [$($field:literal),* $(,)?])?) => {
        impl $crate::store::Document for $ty {
            const COLLECTION: &'static str = $collection;
            $(const INDEXED_FIELDS: &'static [&'static str] = &[$($field),*];)?

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn set_id(&mut self, id: String) {
                self.id = Some(id);
            }
        }
    };
}

/// Copies every `Some` field of `$incoming` onto `$target`, leaving fields the
/// caller omitted untouched.
macro_rules! merge_present {
    ($target:expr, $incoming:expr; $($field:ident),+ $(,)?) => {
        $(
            if $incoming.$field.is_some() {
                $target.$field = $incoming.$field;
            }
        )+
    };
}

pub mod contact;
pub mod enrollment;
pub mod learning;
pub mod skill;
pub mod skill_post;
pub mod skill_progress;

pub use contact::ContactForm;
pub use enrollment::Enrollment;
pub use learning::Learning;
pub use skill::Skill;
pub use skill_post::{Comment, SkillPost};
pub use skill_progress::SkillProgress;
