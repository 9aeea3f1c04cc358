use crate::cli::CommonArgs;
use crate::fetch::fetch_commits;
use crate::model::Commit;
use crate::template::Template;
use anyhow::Context;
use std::io::Write;

pub fn exec(common: CommonArgs, template: &str) -> anyhow::Result<()> {
    let template = Template::parse(template).context("Failed to parse log template")?;
    let commits = fetch_commits(&common).context("Failed to load commits")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_log(&mut out, &commits, &template)?;
    Ok(())
}

pub fn write_log(out: &mut impl Write, commits: &[Commit], template: &Template) -> anyhow::Result<()> {
    for commit in commits {
        out.write_all(template.render(commit).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
