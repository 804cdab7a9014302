use once_cell::sync::Lazy;

/// Number of storage positions in the yard grid.
pub const SLOT_COUNT: usize = 100;

const GRID_SIDE: usize = 10;

/// Slot codes in row-major grid order: A1..A10, B1..B10, ..., J1..J10.
/// Built once at startup, read-only afterwards. The order doubles as the
/// feature-column order the pipeline was fitted on, so it must not change.
pub static SLOT_NAMES: Lazy<Vec<String>> = Lazy::new(|| (0..SLOT_COUNT).map(slot_code).collect());

fn slot_code(i: usize) -> String {
    let row = (b'A' + (i / GRID_SIDE) as u8) as char;
    let col = i % GRID_SIDE + 1;
    format!("{row}{col}")
}

/// Decode a predicted class index back to its slot code.
pub fn index_to_slot(i: usize) -> Option<&'static str> {
    SLOT_NAMES.get(i).map(|s| s.as_str())
}
