pub mod irregular;
pub mod regular;

/// One plate of a finished partition: an id plus the cells it owns.
/// `anchor` is a fixed movement start — the regular partitioner pins
/// it to the block center; without one the synthesizer draws the start
/// from `cells` like the end.
///
/// Plates are transient: they exist between partitioning and
/// synthesis, then are discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct Plate {
    pub id: u16,
    pub cells: Vec<(u32, u32)>,
    pub anchor: Option<(u32, u32)>,
}
