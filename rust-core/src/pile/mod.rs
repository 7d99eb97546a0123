// Pile module: bounded nearest-neighbour selection
// Keeps the K entries with the smallest rank seen so far, sorted ascending, for the contact field.

// ======================== MODULE DECLARATIONS ========================
pub mod nearest_pile;


// ======================== BOUNDED SELECTION ========================
pub use nearest_pile::{
    Pile,      // struct - fixed capacity, rank-sorted (rank, payload) store with stable insertion
    PileEntry, // struct - one retained (rank, payload) pair
};
// Pile impl methods:
//   new(capacity: usize) -> Self                 - empty pile
//   try_new(capacity: usize) -> Result<Self>     - empty pile, reports allocation failure
//   insert(&mut self, rank: f64, value: T)       - O(K) sorted insertion, drops the largest rank when full
//   merge(&mut self, other: Pile<T>)             - inserts another pile's entries in their order
//   ranks(&self) -> impl Iterator<Item = f64>    - retained ranks, ascending
//   iter(&self) -> slice::Iter<PileEntry<T>>     - retained entries, ascending
//   get(&self, slot: usize) -> Option<&PileEntry<T>>
//   len / is_empty / is_full / capacity
