//! Example: build a document from events, walk it, and query it.
//!
//! Run with: cargo run --example navigate

use saxdom_core::{
    search_tag_attribute_value, search_tag_value, Document, Event, StackWalker,
};

fn main() {
    // The event stream a tokenizer would produce for:
    //
    //   <trx>
    //     <auth pin="9021"><est>ok</est></auth>
    //     <ctas><cta nro="114-5">1520.75</cta></ctas>
    //     <info><ipaddr>10.0.4.17</ipaddr></info>
    //   </trx>
    let events = vec![
        Event::DocumentStart,
        Event::ElementStart { name: "trx", attributes: vec![], namespace: None },
        Event::ElementStart { name: "auth", attributes: vec![("pin", "9021")], namespace: None },
        Event::ElementStart { name: "est", attributes: vec![], namespace: None },
        Event::Characters { text: "ok" },
        Event::ElementEnd,
        Event::ElementEnd,
        Event::ElementStart { name: "ctas", attributes: vec![], namespace: None },
        Event::ElementStart { name: "cta", attributes: vec![("nro", "114-5")], namespace: None },
        Event::Characters { text: "1520.75" },
        Event::ElementEnd,
        Event::ElementEnd,
        Event::ElementStart { name: "info", attributes: vec![], namespace: None },
        Event::ElementStart { name: "ipaddr", attributes: vec![], namespace: None },
        Event::Characters { text: "10.0.4.17" },
        Event::ElementEnd,
        Event::ElementEnd,
        Event::ElementEnd,
        Event::DocumentEnd,
    ];

    let doc = Document::from_events(events, 64).expect("build failed");

    println!("=== Document Tree ===\n");
    print!("{}", doc.root().print_node(0));

    println!("\n=== Preorder Walk (pruning auth) ===\n");
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    while let Some(node) = walker.next_node() {
        println!("visit: {}", node.node_name());
        if node.node_name() == "auth" {
            // Skip the credentials subtree.
            walker.skip_children().unwrap();
        }
    }

    println!("\n=== Queries ===\n");
    let estado = search_tag_value(&doc, "trx", "est", true).unwrap();
    println!("est        = {estado:?}");
    let saldo = search_tag_value(&doc, "trx", "cta", true).unwrap();
    println!("cta        = {saldo:?}");
    let nro = search_tag_attribute_value(&doc, "trx", "cta", "nro", true).unwrap();
    println!("cta@nro    = {nro:?}");
    let missing = search_tag_value(&doc, "trx", "saldo2", false).unwrap();
    println!("saldo2     = {missing:?} (lenient default)");
}
