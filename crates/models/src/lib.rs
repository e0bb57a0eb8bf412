pub mod errors;
pub mod db;
pub mod object_id;
pub mod validation;
pub mod device;
pub mod scene;

#[cfg(test)]
mod tests;
