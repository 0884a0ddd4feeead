/// 精靈圖網格：`columns = ceil(sqrt(n))`，`rows = ceil(n / columns)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteGrid {
    pub columns: u32,
    pub rows: u32,
}

impl SpriteGrid {
    #[must_use]
    pub const fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self {
                columns: 0,
                rows: 0,
            };
        }

        let columns = ceil_sqrt(count);
        let rows = count.div_ceil(columns);

        Self {
            columns: columns as u32,
            rows: rows as u32,
        }
    }

    /// 第 `index` 張影格所在格子的左上角
    ///
    /// 呼叫前須先以 [`Self::canvas_size`] 確認畫布尺寸不會溢位
    #[must_use]
    pub const fn cell_origin(&self, index: usize, cell_width: u32, cell_height: u32) -> (u32, u32) {
        let column = (index % self.columns as usize) as u32;
        let row = (index / self.columns as usize) as u32;
        (column * cell_width, row * cell_height)
    }

    /// 畫布尺寸，超出 `u32` 時回傳 `None`
    #[must_use]
    pub const fn canvas_size(&self, cell_width: u32, cell_height: u32) -> Option<(u32, u32)> {
        let Some(width) = self.columns.checked_mul(cell_width) else {
            return None;
        };
        let Some(height) = self.rows.checked_mul(cell_height) else {
            return None;
        };
        Some((width, height))
    }
}

const fn ceil_sqrt(n: usize) -> usize {
    let mut root = n.isqrt();
    if root * root < n {
        root += 1;
    }
    root
}
