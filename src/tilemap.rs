/// A dense 2D grid with one value per canvas pixel.
///
/// Row-major, no wrap-around: a sketch canvas has hard edges, so lookups
/// outside the bounds are rejected rather than folded back in.
#[derive(Clone, Debug)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y * self.width + x
    }

    /// Convert signed coordinates to a grid position, or `None` if they
    /// fall outside the canvas.
    pub fn position(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Bounds-checked lookup with signed coordinates.
    pub fn try_get(&self, x: i64, y: i64) -> Option<&T> {
        self.position(x, y).map(|(x, y)| self.get(x, y))
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_rejects_out_of_bounds() {
        let map = Tilemap::new_with(4, 3, 0.0f32);
        assert_eq!(map.position(0, 0), Some((0, 0)));
        assert_eq!(map.position(3, 2), Some((3, 2)));
        assert_eq!(map.position(-1, 0), None);
        assert_eq!(map.position(4, 0), None);
        assert_eq!(map.position(0, 3), None);
        assert!(map.try_get(10, 10).is_none());
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let mut map = Tilemap::new_with(4, 3, 0.0f32);
        map.set(3, 1, 0.5);
        assert_eq!(*map.get(3, 1), 0.5);
        assert_eq!(*map.get(0, 1), 0.0);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut map = Tilemap::new_with(3, 2, 0u8);
        map.set(1, 1, 4);
        let coords: Vec<_> = map.iter().map(|(x, y, &v)| (x, y, v)).collect();
        assert_eq!(coords[4], (1, 1, 4));
        assert_eq!(coords.len(), 6);
    }
}
