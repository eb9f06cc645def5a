/// Sentinel timeout meaning "block until something is ready".
pub const WAIT_FOREVER: i64 = -1;

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_READ_CHUNK: usize = 4096; // 4KB

pub const STDIN_FD: i32 = 0;
