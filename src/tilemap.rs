/// A bounded 2D grid stored row-major. Unlike a world map, caves never wrap,
/// so every neighbour query stops at the edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
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
        debug_assert!(x < self.width && y < self.height, "tile ({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    /// Check signed coordinates against the map bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Signed lookup; `None` outside the map.
    pub fn try_get(&self, x: i32, y: i32) -> Option<&T> {
        if self.contains(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
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

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
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
    fn test_try_get_outside() {
        let mut map = Tilemap::new_with(3, 3, 0i32);
        map.set(2, 1, 7);

        assert_eq!(map.try_get(2, 1), Some(&7));
        assert_eq!(map.try_get(-1, 0), None);
        assert_eq!(map.try_get(0, 3), None);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut map = Tilemap::new_with(2, 2, 0u8);
        map.set(1, 0, 1);
        map.set(0, 1, 2);

        let cells: Vec<_> = map.iter().map(|(x, y, v)| (x, y, *v)).collect();
        assert_eq!(cells, vec![(0, 0, 0), (1, 0, 1), (0, 1, 2), (1, 1, 0)]);
    }
}
