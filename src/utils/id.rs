use mongodb::bson::oid::ObjectId;

/// Returns whether `id` is a store identifier: the 24-hex-character form of
/// an ObjectId.
pub fn is_valid_id(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}
