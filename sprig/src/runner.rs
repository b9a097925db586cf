//! Runners executing actual application logic.

#[cfg(test)]
use mockall::automock;
use sprig_di::injectable;
pub use sprig_di::instance::ErrorPtr;

pub type ApplicationRunnerPtr = dyn ApplicationRunner + Send + Sync;

/// Runs application logic. Runners are beans providing the [ApplicationRunner] capability; they
/// are discovered by the [Application](crate::application::Application) and run one after another
/// once the container is ready.
#[injectable]
#[cfg_attr(test, automock)]
pub trait ApplicationRunner {
    /// Runs any application code.
    fn run(&self) -> Result<(), ErrorPtr>;

    /// Returns the priority for this runner. Higher priorities get run first. Default 0.
    fn priority(&self) -> i8 {
        0
    }
}
