//! Node permission policy.

use drive_entity::node::Node;
use drive_entity::user::{Actor, Role};

/// Whether the actor may mutate or delete the given node.
///
/// Pure and total over the closed role set. Admins may act on any node,
/// users only on nodes they own, guests only on public nodes. A user
/// actor without an id owns nothing and is denied.
pub fn can_act(node: &Node, actor: &Actor) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Guest => node.is_public,
        Role::User => actor.id.is_some() && node.owner_id == actor.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use drive_entity::node::NodeStatus;
    use uuid::Uuid;

    fn node(owner_id: Option<Uuid>, is_public: bool) -> Node {
        Node {
            id: Uuid::new_v4(),
            name: "doc.txt".to_string(),
            is_folder: false,
            storage_key: Some("uploads/x".to_string()),
            size_bytes: 1,
            mime_type: None,
            owner_id,
            is_public,
            parent_id: None,
            depth: 0,
            status: NodeStatus::Completed,
            is_starred: false,
            is_trashed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_can_act_on_anything() {
        let admin = Actor::admin(Uuid::new_v4());
        assert!(can_act(&node(Some(Uuid::new_v4()), false), &admin));
        assert!(can_act(&node(None, false), &admin));
    }

    #[test]
    fn test_user_owns_or_denied() {
        let id = Uuid::new_v4();
        let user = Actor::user(id);
        assert!(can_act(&node(Some(id), false), &user));
        assert!(!can_act(&node(Some(Uuid::new_v4()), true), &user));
        assert!(!can_act(&node(None, true), &user));
    }

    #[test]
    fn test_user_without_id_is_denied() {
        let actor = Actor {
            id: None,
            role: Role::User,
        };
        assert!(!can_act(&node(None, true), &actor));
    }

    #[test]
    fn test_guest_public_only() {
        let guest = Actor::guest();
        assert!(can_act(&node(None, true), &guest));
        assert!(can_act(&node(Some(Uuid::new_v4()), true), &guest));
        assert!(!can_act(&node(None, false), &guest));
    }
}
