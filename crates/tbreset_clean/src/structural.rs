//! Tree-to-tree transformer: removes stimulus and declarations, keeps the
//! module skeleton.
//!
//! Pure top-down map over the closed item enums. Dropped outright: `initial`
//! blocks, `parameter`/`localparam` and variable/net declarations, `` `define ``
//! directives, and calls to waveform or control system tasks. Instantiations
//! survive with every connection list cleared. Everything else passes through
//! unchanged, spans intact, so the emitter reproduces it verbatim.

use tbreset_common::Interner;
use tbreset_parser::ast::{Instance, Instantiation, ModuleDecl, ModuleItem, SourceItem, SourceTree};

/// System task name fragments whose calls are removed.
const DROPPED_TASKS: [&str; 4] = ["monitor", "dumpfile", "dumpvars", "finish"];

pub fn transform(tree: &SourceTree, interner: &Interner) -> SourceTree {
    let items = tree
        .items
        .iter()
        .filter_map(|item| match item {
            SourceItem::Module(module) => {
                Some(SourceItem::Module(transform_module(module, interner)))
            }
            SourceItem::MacroDefine(_) => None,
            SourceItem::Directive(span) => Some(SourceItem::Directive(*span)),
        })
        .collect();
    SourceTree { items }
}

fn transform_module(module: &ModuleDecl, interner: &Interner) -> ModuleDecl {
    let items = module
        .items
        .iter()
        .filter_map(|item| transform_item(item, interner))
        .collect();
    ModuleDecl {
        name: module.name,
        header_span: module.header_span,
        items,
        span: module.span,
    }
}

fn transform_item(item: &ModuleItem, interner: &Interner) -> Option<ModuleItem> {
    match item {
        ModuleItem::StimulusBlock(_)
        | ModuleItem::Parameter(_)
        | ModuleItem::Declaration(_)
        | ModuleItem::MacroDefine(_) => None,
        ModuleItem::SystemTaskCall(call) => {
            let name = interner.resolve(call.name).to_ascii_lowercase();
            if DROPPED_TASKS.iter().any(|task| name.contains(task)) {
                None
            } else {
                Some(item.clone())
            }
        }
        ModuleItem::Instantiation(inst) => Some(ModuleItem::Instantiation(clear_connections(inst))),
        ModuleItem::PortDecl(_)
        | ModuleItem::AlwaysBlock(_)
        | ModuleItem::ContinuousAssign(_)
        | ModuleItem::FunctionDecl(_)
        | ModuleItem::TaskDecl(_)
        | ModuleItem::GenerateBlock(_)
        | ModuleItem::GenvarDecl(_)
        | ModuleItem::DefparamDecl(_)
        | ModuleItem::Directive(_) => Some(item.clone()),
    }
}

fn clear_connections(inst: &Instantiation) -> Instantiation {
    Instantiation {
        module_name: inst.module_name,
        param_span: inst.param_span,
        instances: inst
            .instances
            .iter()
            .map(|instance| Instance {
                name: instance.name,
                connections: Vec::new(),
            })
            .collect(),
        span: inst.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbreset_parser::parse_file;
    use tbreset_source::SourceDb;

    fn transformed(source: &str) -> (SourceTree, Interner) {
        let mut db = SourceDb::new();
        let file = db.add_source("tb.v", source.to_string());
        let interner = Interner::new();
        let tree = parse_file(file, &db, &interner).expect("parse failure");
        let out = transform(&tree, &interner);
        (out, interner)
    }

    fn module_items(tree: &SourceTree) -> &[ModuleItem] {
        match &tree.items[..] {
            [SourceItem::Module(m)] => &m.items,
            other => panic!("expected a single module, got {other:?}"),
        }
    }

    #[test]
    fn drops_stimulus_and_declarations() {
        let (tree, _) = transformed(
            "module tb;\n\
             reg clk;\n\
             wire q;\n\
             parameter P = 1;\n\
             initial begin clk = 0; end\n\
             always #5 clk = ~clk;\n\
             endmodule\n",
        );
        let items = module_items(&tree);
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], ModuleItem::AlwaysBlock(_)));
    }

    #[test]
    fn drops_waveform_tasks_keeps_others() {
        let (tree, interner) = transformed(
            "module tb;\n\
             $dumpfile(\"tb.vcd\");\n\
             $dumpvars(0, tb);\n\
             $monitor(\"%d\", x);\n\
             $fsdbDumpvars;\n\
             $timeformat(-9, 2, \" ns\", 10);\n\
             endmodule\n",
        );
        let items = module_items(&tree);
        assert_eq!(items.len(), 1);
        match &items[0] {
            ModuleItem::SystemTaskCall(call) => {
                assert_eq!(interner.resolve(call.name), "timeformat");
            }
            other => panic!("expected system task, got {other:?}"),
        }
    }

    #[test]
    fn clears_instance_connections() {
        let (tree, _) = transformed(
            "module tb;\ncounter #(.W(8)) dut (.clk(clk), .q(q)), mon (.clk(clk));\nendmodule\n",
        );
        let items = module_items(&tree);
        match &items[0] {
            ModuleItem::Instantiation(inst) => {
                assert!(inst.param_span.is_some());
                assert_eq!(inst.instances.len(), 2);
                assert!(inst.instances.iter().all(|i| i.connections.is_empty()));
            }
            other => panic!("expected instantiation, got {other:?}"),
        }
    }

    #[test]
    fn top_level_define_is_dropped() {
        let (tree, _) = transformed("`define PERIOD 10\n`timescale 1ns/1ps\nmodule tb;\nendmodule\n");
        assert_eq!(tree.items.len(), 2);
        assert!(matches!(tree.items[0], SourceItem::Directive(_)));
    }
}
