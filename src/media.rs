pub mod decode;
pub mod element;
pub mod frame;
pub mod provider;
pub mod stream;
