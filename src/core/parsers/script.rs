use std::{ops::Range, sync::Arc};

use anyhow::{Result, anyhow, bail};
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::core::parsers::sfc::SfcBlock;

pub struct ParsedScript {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Parse the `<script>` block of a component.
///
/// Everything outside the block is blanked (newlines kept), so swc spans and
/// the line/column lookups on `source_map` refer to the `.vue` file itself.
pub fn parse_script_block(
    source: &str,
    block: &SfcBlock,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedScript> {
    let range = block.content_start..block.content_start + block.content.len();
    parse_script_source(mask_outside(source, range), file_path, block.lang(), source_map)
}

/// Parse JavaScript/TypeScript module source into an AST.
///
/// `lang` is the block's `lang` attribute: `ts`, `tsx`, `jsx`, or `js`/none.
pub fn parse_script_source(
    code: String,
    file_path: &str,
    lang: Option<&str>,
    source_map: Arc<SourceMap>,
) -> Result<ParsedScript> {
    let syntax = match lang.unwrap_or("js") {
        "js" | "javascript" => Syntax::Es(EsSyntax::default()),
        "jsx" => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        "ts" | "typescript" => Syntax::Typescript(TsSyntax::default()),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        other => bail!("Unsupported script lang \"{}\"", other),
    };

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse script: {:?}", e.kind()))?;

        Ok(ParsedScript { module, source_map })
    })
}

/// Replace every byte outside `keep` with a space, preserving line breaks.
fn mask_outside(source: &str, keep: Range<usize>) -> String {
    let mut masked = String::with_capacity(source.len());
    for (i, c) in source.char_indices() {
        if keep.contains(&i) || c == '\n' || c == '\r' {
            masked.push(c);
        } else {
            // One space per byte keeps every later offset unchanged.
            masked.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    }
    masked
}
