use futures::Future;
use snafu::{ResultExt, Snafu};
use tokio::runtime;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not build the tokio runtime: {}", source))]
    Runtime { source: std::io::Error },
}

/// Runs the future to completion on a multi threaded runtime, with one worker
/// per cpu unless a number of threads is given.
pub fn launch_with_runtime<F, T, E>(
    nb_threads: Option<usize>,
    future: F,
) -> Result<Result<T, E>, Error>
where
    F: Future<Output = Result<T, E>>,
{
    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(nb_threads.unwrap_or_else(num_cpus::get))
        .enable_all()
        .build()
        .context(RuntimeSnafu)?;

    Ok(runtime.block_on(future))
}
