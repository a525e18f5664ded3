pub mod navigation;
pub mod sort;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;
