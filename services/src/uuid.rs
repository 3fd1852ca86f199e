use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
///
/// Used for vector-store point ids so re-ingesting the same document
/// overwrites the old points instead of duplicating them.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

/// Random identifier for background jobs.
pub fn new_job_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_uuid_is_deterministic() {
        assert_eq!(stable_uuid("notes.txt#3"), stable_uuid("notes.txt#3"));
        assert_ne!(stable_uuid("notes.txt#3"), stable_uuid("notes.txt#4"));
    }
}
