//! 精靈圖合成元件
//!
//! 將多張影格排成 `ceil(sqrt(n))` 欄的網格，合成為單張 PNG

mod background;
mod compositor;
mod grid;

pub use background::Background;
pub use compositor::{
    CellSize, FitRect, MAX_CANVAS_PIXELS, MAX_CELL_SIZE, SpriteSheet, aspect_fit, create_sprite_sheet,
};
pub use grid::SpriteGrid;
