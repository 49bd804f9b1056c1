use crate::cli::ShowArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub fn run(ctx: &AppContext, args: ShowArgs) -> AppResult<()> {
    let profile = ctx.resolver.get_profile(&args.name);
    if profile.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "no readable device profile named {}",
            args.name
        )));
    }

    let lines: Vec<String> = profile
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    ctx.output.emit(&lines, &profile)
}
