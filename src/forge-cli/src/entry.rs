//! Invocation pipeline.
//!
//! Normalized arguments go through the dispatcher; built-ins run through
//! the tracking wrapper, plugins run to completion. Whatever happens is
//! reduced to a single [`Outcome`] and handed to the translator, which ends
//! the process.

use std::sync::Arc;

use crate::context::ProcessContext;
use crate::dispatch::{Dispatch, Dispatcher};
use crate::normalize::NormalizedArgs;
use crate::outcome::{self, Outcome};
use crate::tracking;

/// Run one invocation to its [`Outcome`] without exiting.
pub async fn invoke(
    dispatcher: &Dispatcher,
    ctx: &Arc<ProcessContext>,
    args: &NormalizedArgs,
) -> Outcome {
    let dispatch = match dispatcher.dispatch(args, ctx) {
        Ok(dispatch) => dispatch,
        Err(e) => return Outcome::from_error(e),
    };

    match dispatch {
        Dispatch::Builtin(command) => Outcome::from_result(tracking::execute(*command, ctx).await),
        Dispatch::External(external) => match external.run().await {
            Ok(exit_code) => Outcome::Delegated { exit_code },
            Err(e) => Outcome::from_error(e),
        },
    }
}

/// Run one invocation and end the process with its exit code.
pub async fn run(ctx: Arc<ProcessContext>, args: NormalizedArgs) -> ! {
    let dispatcher = Dispatcher::for_context(&ctx);
    let outcome = invoke(&dispatcher, &ctx, &args).await;
    outcome::terminate(outcome, ctx.pending()).await
}
