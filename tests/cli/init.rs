use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, component, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ Created .vuedatarc.json\n");

    let content = test.read_file(".vuedatarc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["rules"]["no-unused-data"], "warn");
    assert_eq!(parsed["sourceRoot"], "./");
    assert!(content.contains("\n  \"includes\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".vuedatarc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".vuedatarc.json already exists"));
    assert_eq!(test.read_file(".vuedatarc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/App.vue", &component("<p>{{ a }}</p>", &["a"]))?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
