use anyhow::Result;

use crate::{CliTest, component, stderr, stdout};

#[test]
fn test_reports_unused_data() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.vue",
        &component("  <p>{{ used }}</p>", &["used", "unused"]),
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0), "warnings do not fail the run");
    insta::assert_snapshot!(stdout(&output), @r#"
    warning: The "unused" has been defined in data but not used in the template.  no-unused-data
      --> ./src/App.vue:10:7
       |
    10 |       unused: null,
       |       ^

    ✘ 1 problem (0 errors, 1 warning)
    "#);

    Ok(())
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/List.vue",
        &component(
            r#"  <ul :class="{ empty: !items.length }"><li v-for="item in items" @click="pick(item)">{{ item | label }}</li></ul>"#,
            &["items", "pick"],
        ),
    )?;

    let output = test.check_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "✓ Checked 1 component file - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_component_without_template_is_skipped() -> Result<()> {
    let test = CliTest::with_file(
        "src/Renderless.vue",
        "<script>\nexport default {\n  data() {\n    return { state: 1 }\n  }\n}\n</script>\n",
    )?;

    let output = test.check_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("no issues found"));

    Ok(())
}

#[test]
fn test_error_level_fails() -> Result<()> {
    let test = CliTest::with_file("App.vue", &component("<p></p>", &["stale"]))?;
    test.write_file(
        ".vuedatarc.json",
        r#"{ "rules": { "no-unused-data": "error" } }"#,
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: The \"stale\" has been defined in data"));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_rule_off() -> Result<()> {
    let test = CliTest::with_file("App.vue", &component("<p></p>", &["stale"]))?;
    test.write_file(".vuedatarc.json", r#"{ "rules": { "no-unused-data": "off" } }"#)?;

    let output = test.check_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("no issues found"));

    Ok(())
}

#[test]
fn test_parse_error() -> Result<()> {
    let test = CliTest::with_file(
        "Broken.vue",
        "<template></template>\n<script>export default {</script>\n",
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("parse-error"));
    assert!(stdout(&output).contains("--> ./Broken.vue"));
    assert!(stderr(&output).contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_typescript_component() -> Result<()> {
    let test = CliTest::with_file(
        "Counter.vue",
        r#"<template>
  <button @click="bump(step)">{{ count as number }}</button>
</template>

<script lang="ts">
import { defineComponent } from 'vue'

export default defineComponent({
  data(): { count: number; step: number; label: string } {
    return { count: 0, step: 1, label: '' }
  },
})
</script>
"#,
    )?;

    let output = test.check_command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"label\""));
    assert!(out.contains("1 problem"));

    Ok(())
}

#[test]
fn test_config_ignores_and_test_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".vuedatarc.json", r#"{ "ignores": ["**/legacy/**"] }"#)?;
    test.write_file("src/legacy/Old.vue", &component("<p></p>", &["a"]))?;
    test.write_file("src/Button.spec.vue", &component("<p></p>", &["b"]))?;
    test.write_file("src/Button.vue", &component("<p>{{ c }}</p>", &["c"]))?;

    let output = test.check_command().output()?;

    assert_eq!(
        stdout(&output),
        "✓ Checked 1 component file - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_source_root_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("web/App.vue", &component("<p></p>", &["stale"]))?;
    test.write_file("other/App.vue", &component("<p></p>", &["elsewhere"]))?;

    let output = test
        .check_command()
        .arg("--source-root")
        .arg(test.root().join("web"))
        .output()?;

    let out = stdout(&output);
    assert!(out.contains("\"stale\""));
    assert!(!out.contains("elsewhere"));

    Ok(())
}

#[test]
fn test_verbose_reports_blind_spots() -> Result<()> {
    let test = CliTest::with_file(
        "App.vue",
        &component("<p>{{ new Date(stamp) }}</p>", &["stamp"]),
    )?;

    let output = test.check_command().arg("-v").output()?;

    assert!(stdout(&output).contains("\"stamp\""));
    assert!(stderr(&output).contains("new expression is not analysed"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("App.vue", &component("<p></p>", &[]))?;
    test.write_file(".vuedatarc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("check"));
    assert!(out.contains("init"));
    assert!(out.contains("serve"));

    Ok(())
}
