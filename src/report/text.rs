use crate::report::{ReportContext, format_list};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let mut out = String::new();

    for section in &ctx.structures {
        out.push_str(&format!(
            "For {}, {} unique genes found: {}\n",
            section.structure,
            section.genes.len(),
            format_list(&section.genes)
        ));
    }
    out.push_str(&format!("Shared genes are: {}\n", format_list(&ctx.shared)));

    out
}
