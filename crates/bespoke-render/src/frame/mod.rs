//! Frame Driver: one device frame and one canvas frame per host tick.

mod driver;

pub use driver::FrameDriver;
