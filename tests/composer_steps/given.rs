//! Given steps for composer BDD scenarios.

use super::world::{ComposerWorld, parse_operation, parse_time};
use composer::form::{
    domain::EntityKind,
    services::{ComposerForm, OpenRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the current time is "{now}""#)]
fn current_time(world: &mut ComposerWorld, now: String) -> Result<(), eyre::Report> {
    world.now = Some(parse_time(&now)?);
    Ok(())
}

#[given(r#"the remote rejects "{operation}""#)]
fn remote_rejects(world: &mut ComposerWorld, operation: String) -> Result<(), eyre::Report> {
    world.remote.fail_on(parse_operation(&operation)?);
    Ok(())
}

#[given(r#"a "{mode}" composer is open"#)]
fn composer_is_open(world: &mut ComposerWorld, mode: String) -> Result<(), eyre::Report> {
    let kind = match mode.as_str() {
        "task" => EntityKind::Task,
        "event" => EntityKind::Event,
        other => return Err(eyre::eyre!("unknown composer mode {other:?}")),
    };
    let form = ComposerForm::open(OpenRequest::new(kind), world.deps()?)
        .wrap_err("open composer for scenario")?;
    world.form = Some(form);
    Ok(())
}
