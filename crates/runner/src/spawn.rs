use std::future::Future;
use std::sync::OnceLock;

use arrayviz_primitives::OpKind;
use tokio::task::JoinHandle;

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("arrayviz-runner-global")
			.build()
			.expect("failed to build arrayviz-runner global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns the task driving one run on the current runtime.
///
/// Outside a runtime, runs land on a lazily built single-worker runtime.
pub(crate) fn spawn_run<F>(kind: OpKind, generation: u64, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(op = kind.as_str(), generation, "runner.spawn");
	runtime_handle().spawn(fut)
}
