//! Navigation cursor over a frame store
//!
//! The cursor is the single source of truth for which frame a session is looking at.
//! Moves are bounded: stepping past either end is reported as [`OutOfRange`] and
//! leaves the cursor where it was. There is no wraparound.

use std::fmt;

/// A move that would leave `0..len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub from: usize,
    pub offset: isize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame out of range.")
    }
}

/// Compute `current + offset` if it lands inside `0..len`
pub fn step(current: usize, offset: isize, len: usize) -> Result<usize, OutOfRange> {
    current
        .checked_add_signed(offset)
        .filter(|candidate| *candidate < len)
        .ok_or(OutOfRange {
            from: current,
            offset,
            len,
        })
}

/// Current frame index, always inside `0..len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    current: usize,
    len: usize,
}

impl Cursor {
    /// Place a cursor at `start` over a store of `len` frames
    pub fn new(start: usize, len: usize) -> Result<Self, OutOfRange> {
        if start >= len {
            return Err(OutOfRange {
                from: 0,
                offset: isize::try_from(start).unwrap_or(isize::MAX),
                len,
            });
        }
        Ok(Cursor {
            current: start,
            len,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of frames the cursor ranges over
    pub fn frame_count(&self) -> usize {
        self.len
    }

    /// Where a move by `offset` would land, without moving
    pub fn target(&self, offset: isize) -> Result<usize, OutOfRange> {
        step(self.current, offset, self.len)
    }

    /// Move by `offset`; on failure the cursor is unchanged
    pub fn move_by(&mut self, offset: isize) -> Result<usize, OutOfRange> {
        let target = self.target(offset)?;
        self.current = target;
        Ok(target)
    }

    /// Move `count` frames toward index 0
    pub fn move_up(&mut self, count: usize) -> Result<usize, OutOfRange> {
        let offset = isize::try_from(count).map_or(isize::MIN, |count| -count);
        self.land(self.current.checked_sub(count), offset)
    }

    /// Move `count` frames away from index 0
    pub fn move_down(&mut self, count: usize) -> Result<usize, OutOfRange> {
        let offset = isize::try_from(count).unwrap_or(isize::MAX);
        self.land(self.current.checked_add(count), offset)
    }

    /// Move to an absolute index
    pub fn move_to(&mut self, index: usize) -> Result<usize, OutOfRange> {
        // current < len, and a Vec never holds more than isize::MAX elements
        let offset = isize::try_from(index)
            .unwrap_or(isize::MAX)
            .saturating_sub(self.current as isize);
        self.land(Some(index), offset)
    }

    /// Commit `target` if it is inside `0..len`; `offset` is only reported
    fn land(&mut self, target: Option<usize>, offset: isize) -> Result<usize, OutOfRange> {
        match target.filter(|target| *target < self.len) {
            Some(target) => {
                self.current = target;
                Ok(target)
            }
            None => Err(OutOfRange {
                from: self.current,
                offset,
                len: self.len,
            }),
        }
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges_are_not_wrapped() {
        let mut cursor = Cursor::new(0, 3).unwrap();
        assert!(cursor.is_first());
        assert_eq!(
            cursor.move_by(-1),
            Err(OutOfRange {
                from: 0,
                offset: -1,
                len: 3
            })
        );
        assert_eq!(cursor.current(), 0);

        assert_eq!(cursor.move_by(2), Ok(2));
        assert!(cursor.is_last());
        assert!(cursor.move_by(1).is_err());
        assert_eq!(cursor.current(), 2);
    }

    #[test]
    fn test_new_rejects_start_past_end() {
        assert!(Cursor::new(3, 3).is_err());
        assert!(Cursor::new(0, 0).is_err());
        assert_eq!(Cursor::new(2, 3).unwrap().current(), 2);
    }

    #[test]
    fn test_move_to_absolute_index() {
        let mut cursor = Cursor::new(1, 5).unwrap();
        assert_eq!(cursor.move_to(4), Ok(4));
        assert_eq!(cursor.move_to(0), Ok(0));
        assert!(cursor.move_to(5).is_err());
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn test_huge_counts_are_out_of_range() {
        let mut cursor = Cursor::new(0, 3).unwrap();
        assert_eq!(
            cursor.move_up(usize::MAX),
            Err(OutOfRange {
                from: 0,
                offset: isize::MIN,
                len: 3
            })
        );
        assert!(cursor.move_up(1 << 63).is_err());
        assert!(cursor.move_down(usize::MAX).is_err());
        assert!(cursor.move_to(usize::MAX).is_err());
        assert_eq!(cursor.current(), 0);

        assert_eq!(cursor.move_down(2), Ok(2));
        assert!(cursor.move_down(usize::MAX).is_err());
        assert_eq!(cursor.move_up(2), Ok(0));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = step(0, -1, 1).unwrap_err();
        assert_eq!(err.to_string(), "Frame out of range.");
    }

    fn position() -> impl Strategy<Value = (usize, usize)> {
        (1usize..64).prop_flat_map(|len| (Just(len), 0..len))
    }

    proptest! {
        #[test]
        fn prop_step_matches_bounds((len, current) in position(), offset in -80isize..80) {
            let candidate = current as isize + offset;
            let result = step(current, offset, len);
            if candidate < 0 || candidate >= len as isize {
                prop_assert!(result.is_err());
            } else {
                prop_assert_eq!(result, Ok(candidate as usize));
            }
        }

        #[test]
        fn prop_counted_moves_match_step((len, start) in position(), count in 0usize..80) {
            let mut up = Cursor::new(start, len).unwrap();
            prop_assert_eq!(up.move_up(count).ok(), step(start, -(count as isize), len).ok());

            let mut down = Cursor::new(start, len).unwrap();
            prop_assert_eq!(down.move_down(count).ok(), step(start, count as isize, len).ok());
        }

        #[test]
        fn prop_edges_reject_outward_moves(len in 1usize..64) {
            prop_assert!(step(len - 1, 1, len).is_err());
            prop_assert!(step(0, -1, len).is_err());
        }

        #[test]
        fn prop_failed_move_leaves_cursor((len, start) in position(), offset in -80isize..80) {
            let mut cursor = Cursor::new(start, len).unwrap();
            if cursor.move_by(offset).is_err() {
                prop_assert_eq!(cursor.current(), start);
            }
        }
    }
}
