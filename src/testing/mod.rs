mod env;
mod fakes;

pub use env::EnvVarGuard;
pub use fakes::{
    FakeExecutionNameResolver, FakeLogUploader, FakeProcessRunner, FakeStorageProvisioner,
};
