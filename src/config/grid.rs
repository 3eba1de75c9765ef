/// Geometry of the rendered card grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGridConfig {
    pub columns: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub gap: u32,
}

impl CardGridConfig {
    pub const MIN_COLUMNS: u32 = 1;
    pub const MAX_COLUMNS: u32 = 6;
    pub const DEFAULT_COLUMNS: u32 = 3;
    pub const DEFAULT_CARD_WIDTH: u32 = 320;
    pub const DEFAULT_CARD_HEIGHT: u32 = 96;
    pub const MIN_CARD_LIMIT: u32 = 64;
    pub const MAX_CARD_LIMIT: u32 = 1200;
    pub const DEFAULT_GAP: u32 = 16;
    pub const MAX_GAP: u32 = 128;

    pub fn with_columns(columns: u32) -> Self {
        Self {
            columns,
            ..Self::default()
        }
        .sanitized()
    }

    pub fn sanitize_card_dimension(value: u32) -> u32 {
        value.clamp(Self::MIN_CARD_LIMIT, Self::MAX_CARD_LIMIT)
    }

    /// Copy with every value clamped to its supported range
    pub fn sanitized(self) -> Self {
        Self {
            columns: self.columns.clamp(Self::MIN_COLUMNS, Self::MAX_COLUMNS),
            card_width: Self::sanitize_card_dimension(self.card_width),
            card_height: Self::sanitize_card_dimension(self.card_height),
            gap: self.gap.min(Self::MAX_GAP),
        }
    }

    /// Rows needed to place `card_count` cards
    pub fn rows_for(&self, card_count: usize) -> u32 {
        let columns = self.columns.max(1) as usize;
        card_count.div_ceil(columns) as u32
    }

    /// Canvas size in pixels for `card_count` cards, at least one empty row
    pub fn canvas_size(&self, card_count: usize) -> (u32, u32) {
        let rows = self.rows_for(card_count).max(1);
        let columns = self.columns.max(1);
        let width = columns * self.card_width + (columns + 1) * self.gap;
        let height = rows * self.card_height + (rows + 1) * self.gap;
        (width, height)
    }
}

impl Default for CardGridConfig {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            card_width: Self::DEFAULT_CARD_WIDTH,
            card_height: Self::DEFAULT_CARD_HEIGHT,
            gap: Self::DEFAULT_GAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_everything() {
        let config = CardGridConfig {
            columns: 40,
            card_width: 5,
            card_height: 5000,
            gap: 999,
        }
        .sanitized();

        assert_eq!(config.columns, CardGridConfig::MAX_COLUMNS);
        assert_eq!(config.card_width, CardGridConfig::MIN_CARD_LIMIT);
        assert_eq!(config.card_height, CardGridConfig::MAX_CARD_LIMIT);
        assert_eq!(config.gap, CardGridConfig::MAX_GAP);
    }

    #[test]
    fn zero_columns_becomes_one() {
        assert_eq!(CardGridConfig::with_columns(0).columns, 1);
    }

    #[test]
    fn rows_round_up() {
        let config = CardGridConfig::with_columns(3);
        assert_eq!(config.rows_for(0), 0);
        assert_eq!(config.rows_for(3), 1);
        assert_eq!(config.rows_for(4), 2);
    }

    #[test]
    fn canvas_includes_gaps() {
        let config = CardGridConfig {
            columns: 2,
            card_width: 100,
            card_height: 80,
            gap: 10,
        };
        assert_eq!(config.canvas_size(3), (230, 190));
        assert_eq!(config.canvas_size(0), (230, 100));
    }
}
