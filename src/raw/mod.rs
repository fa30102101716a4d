mod arena;
mod handle;
mod node;
mod raw_rbtree_map;
mod size;
mod verify;
mod walk;

pub(crate) use raw_rbtree_map::RawRBTreeMap;
pub(crate) use walk::Walk;
