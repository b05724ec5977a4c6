#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, render_dots, render_marks, run_seed, PngRaster, RasterCanvas, BLACK, WHITE,
};
