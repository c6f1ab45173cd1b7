use data::NoteId;
use rand::Rng;
use uuid::{Uuid, Variant, Version};

/// A random (v4) UUID drawn from `rng`
pub fn random_uuid(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}

pub fn random_note_id() -> NoteId {
    random_uuid(&mut rand::rng()).into()
}
