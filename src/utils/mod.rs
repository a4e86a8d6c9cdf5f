pub mod jwt;
pub mod password;
pub mod photo;
pub mod s3;
pub mod validation;
