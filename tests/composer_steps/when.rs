//! When steps for composer BDD scenarios.

use super::world::{ComposerWorld, parse_rule, run_async};
use composer::form::domain::{AttachmentFile, EntityKind};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the title is set to "{title}""#)]
fn set_title(world: &mut ComposerWorld, title: String) -> Result<(), eyre::Report> {
    world.form_mut()?.set_title(title);
    Ok(())
}

#[when(r#"the "{rule}" suggestion is accepted"#)]
fn accept_suggestion(world: &mut ComposerWorld, rule: String) -> Result<(), eyre::Report> {
    let wanted = parse_rule(&rule)?;
    let form = world.form_mut()?;
    let index = form
        .suggestions()
        .iter()
        .position(|message| message.rule() == wanted)
        .ok_or_else(|| eyre::eyre!("no {rule} suggestion to accept"))?;
    form.accept_suggestion(index)
        .wrap_err("accept suggestion in scenario")?;
    Ok(())
}

#[when(r#"the file "{name}" is attached"#)]
fn attach_file(world: &mut ComposerWorld, name: String) -> Result<(), eyre::Report> {
    let file = AttachmentFile::new(name, "application/octet-stream", b"scenario".to_vec());
    world
        .form_mut()?
        .add_files([file])
        .wrap_err("stage file in scenario")?;
    Ok(())
}

#[when(r#"the mode is switched to "{mode}""#)]
fn switch_mode(world: &mut ComposerWorld, mode: String) -> Result<(), eyre::Report> {
    let kind = match mode.as_str() {
        "task" => EntityKind::Task,
        "event" => EntityKind::Event,
        other => return Err(eyre::eyre!("unknown composer mode {other:?}")),
    };
    world.form_mut()?.set_mode(kind);
    Ok(())
}

#[when("the form is submitted")]
fn submit_form(world: &mut ComposerWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.form_mut()?.submit());
    world.last_submit = Some(result);
    Ok(())
}
