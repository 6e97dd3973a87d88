use crate::errors::ChecklistError;

/// A drag in progress: which row was picked up and which slot it would land
/// in if released now. Dropping the gesture without `finish` commits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    from: usize,
    slot: usize,
    len: usize,
}

impl DragGesture {
    pub fn begin(from: usize, len: usize) -> Result<Self, ChecklistError> {
        if from >= len {
            return Err(ChecklistError::Index { index: from, len });
        }
        Ok(Self {
            from,
            slot: from,
            len,
        })
    }

    /// Moves the placeholder. Slots past the end clamp to the last position.
    pub fn hover(&mut self, slot: usize) {
        self.slot = slot.min(self.len - 1);
    }

    #[cfg(test)]
    fn slot(&self) -> usize {
        self.slot
    }

    /// Original indices in their new order, ready for `Session::reorder`.
    pub fn finish(self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len).filter(|&i| i != self.from).collect();
        order.insert(self.slot, self.from);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_drag_is_identity() {
        let drag = DragGesture::begin(1, 3).unwrap();
        assert_eq!(drag.finish(), vec![0, 1, 2]);
    }

    #[test]
    fn drag_down_shifts_rows_up() {
        let mut drag = DragGesture::begin(0, 4).unwrap();
        drag.hover(2);
        assert_eq!(drag.finish(), vec![1, 2, 0, 3]);
    }

    #[test]
    fn drag_to_top() {
        let mut drag = DragGesture::begin(2, 3).unwrap();
        drag.hover(0);
        assert_eq!(drag.finish(), vec![2, 0, 1]);
    }

    #[test]
    fn hover_past_end_clamps() {
        let mut drag = DragGesture::begin(0, 3).unwrap();
        drag.hover(40);
        assert_eq!(drag.slot(), 2);
        assert_eq!(drag.finish(), vec![1, 2, 0]);
    }

    #[test]
    fn begin_rejects_missing_row() {
        assert!(matches!(
            DragGesture::begin(3, 3),
            Err(ChecklistError::Index { index: 3, len: 3 })
        ));
        assert!(DragGesture::begin(0, 0).is_err());
    }
}
