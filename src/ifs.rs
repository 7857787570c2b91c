pub mod wl_buffer;
pub mod wl_callback;
pub mod wl_compositor;
pub mod wl_region;
pub mod wl_seat;
pub mod wl_shm;
pub mod wl_shm_pool;
pub mod wl_surface;
