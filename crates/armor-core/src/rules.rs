//! 遊戲規則常數

/// 一套配裝的裝備件數
pub const PIECES_PER_BUILD: u32 = 5;

/// 配裝中最多可使用的異域裝備件數
pub const MAX_EXOTIC_PIECES: u32 = 1;

/// 大型與小型模組合計上限
pub const MAX_MODIFIERS: u32 = 5;

/// 單一屬性最多可裝的大型模組數
pub const MAX_MAJOR_PER_STAT: u32 = 5;

/// 單一屬性最多可裝的小型模組數
pub const MAX_MINOR_PER_STAT: u32 = 2;

/// 大型模組加成
pub const MAJOR_MOD_POINTS: i64 = 10;

/// 小型模組加成
pub const MINOR_MOD_POINTS: i64 = 5;

/// 單件裝備在各屬性類別上的點數分配
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePoints {
    pub primary: i64,
    pub secondary: i64,
    pub tertiary: i64,
    /// 其餘屬性的保底點數
    pub floor: i64,
}

impl PiecePoints {
    /// 單件總點數：主 + 副 + 第三 + 其餘三項保底
    pub const fn budget(&self) -> i64 {
        self.primary + self.secondary + self.tertiary + 3 * self.floor
    }
}

/// 一般裝備（總點數 90）
pub const STANDARD_PIECE: PiecePoints = PiecePoints {
    primary: 30,
    secondary: 25,
    tertiary: 20,
    floor: 5,
};

/// 異域裝備（總點數 78）
pub const EXOTIC_PIECE: PiecePoints = PiecePoints {
    primary: 30,
    secondary: 20,
    tertiary: 13,
    floor: 5,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_budgets() {
        assert_eq!(STANDARD_PIECE.budget(), 90);
        assert_eq!(EXOTIC_PIECE.budget(), 78);
    }
}
