pub mod blur;
pub mod composite;
pub mod compositor;
pub mod mask;
pub mod pipeline;
pub mod surface;
pub mod text;
