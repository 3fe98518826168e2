/// Identifies a chunk column on the horizontal grid.
///
/// Hashing is derived and therefore field-sequential, so `(a, b)` and
/// `(b, a)` hash differently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        dx * dx + dy * dy
    }

    /// Chunk containing the given world-space horizontal position.
    #[inline]
    pub fn of_world(wx: f32, wy: f32, chunk_width: usize) -> Self {
        let w = chunk_width as f32;
        Self {
            cx: (wx / w).floor() as i32,
            cy: (wy / w).floor() as i32,
        }
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy)
    }
}
