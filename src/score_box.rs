/// Pending, not yet banked, score of the player currently rolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBox {
    value: u32,
}

impl ScoreBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn add(&mut self, face: u32) {
        self.value += face;
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_sum_of_faces() {
        let mut score_box = ScoreBox::new();
        let faces = [4, 5, 6, 2, 3];
        for (k, face) in faces.iter().enumerate() {
            score_box.add(*face);
            assert_eq!(score_box.value(), faces[..=k].iter().sum::<u32>());
        }
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut score_box = ScoreBox::new();
        score_box.add(30);
        score_box.reset();
        assert_eq!(score_box.value(), 0);
    }
}
