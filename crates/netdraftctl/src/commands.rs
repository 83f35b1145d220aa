//! Command implementations for netdraftctl.

use crate::client::DaemonClient;
use anyhow::{Context, Result};
use netdraft_common::catalog::{device, ALL_KINDS};
use netdraft_common::conversation::ConversationContext;
use netdraft_common::export::{drawio_xml, parse_ip_table, to_csv, to_xlsx, wrap_png_in_pdf};
use netdraft_common::layout::compute_layout;
use netdraft_common::render::{render_png, render_svg};
use netdraft_common::reports::{cost_breakdown, format_thousands};
use netdraft_common::requirements::NetworkRequirements;
use netdraft_common::rpc::{ChatMessage, ChatRequest};
use netdraft_common::topology::generate_design;
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

const WELCOME: &str = "Welcome! I'm your network design assistant. I'll help you create a \
comprehensive network infrastructure plan. Let's start by understanding your business and \
technical requirements.";

const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// Generate a design from a requirements file and write every export artifact.
pub fn design(input: &Path, out: &Path, scale: f32) -> Result<()> {
    let req = NetworkRequirements::load(input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    let design = generate_design(&req);
    let layout = compute_layout(&design.graph);

    fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;

    fs::write(out.join("ip_allocation.html"), &design.output.ip_allocation)?;
    fs::write(out.join("recommendations.html"), &design.output.recommendations)?;
    fs::write(out.join("cost_estimate.html"), &design.output.cost_estimate)?;

    let svg = render_svg(&design.graph, &layout);
    fs::write(out.join("network_diagram.svg"), &svg)?;

    let png = render_png(&design.graph, &layout, scale)?;
    fs::write(out.join("network_diagram.png"), &png)?;
    fs::write(out.join("network_diagram.pdf"), wrap_png_in_pdf(&png)?)?;
    fs::write(
        out.join("network_diagram.drawio"),
        drawio_xml(&design.graph, &layout)?,
    )?;

    let records = parse_ip_table(&design.output.ip_allocation);
    fs::write(out.join("ip_allocation.csv"), to_csv(&records)?)?;
    fs::write(out.join("ip_allocation.xlsx"), to_xlsx(&records)?)?;

    let breakdown = cost_breakdown(&req);
    println!("{}", "Network design generated".green().bold());
    println!(
        "  {} nodes, {} edges, {} departments",
        design.graph.nodes.len(),
        design.graph.edges.len(),
        req.departments.len()
    );
    let total = format!("${}", format_thousands(breakdown.total));
    if breakdown.total > breakdown.budget {
        println!(
            "  Estimated cost {} exceeds budget ${} by ${}",
            total.red().bold(),
            format_thousands(breakdown.budget),
            format_thousands(breakdown.total - breakdown.budget)
        );
    } else {
        println!(
            "  Estimated cost {} within budget ${} (${} remaining)",
            total.green().bold(),
            format_thousands(breakdown.budget),
            format_thousands(breakdown.budget - breakdown.total)
        );
    }
    println!(
        "  Artifacts written to {} at {}",
        out.display().to_string().bold(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

/// Interactive chat intake against the daemon. One request is in flight at a
/// time: input is not read again until the previous turn resolved.
pub async fn chat(url: Option<&str>) -> Result<()> {
    let client = DaemonClient::new(url)?;
    let mut messages = vec![ChatMessage::assistant(WELCOME)];
    let mut context = ConversationContext::default();
    let mut design_shown = false;

    println!("{}", WELCOME.cyan());
    println!("{}", "Type 'exit' to quit.".dimmed());

    let stdin = io::stdin();
    loop {
        if let Some(next) = context.questions.first() {
            println!("{}", format!("(Next: {next})").dimmed());
        }
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        messages.push(ChatMessage::user(input));
        let request = ChatRequest {
            messages: messages.clone(),
            context: Some(context.clone()),
        };

        match client.chat(&request).await {
            Ok(response) => {
                println!("{}", response.content.trim());
                messages.push(ChatMessage::assistant(response.content.clone()));
                context = response.context;

                if context.ready_for_design() && !design_shown {
                    design_shown = true;
                    print_generated_design(&context);
                }
            }
            Err(e) => {
                println!("{}", APOLOGY.red());
                println!("{}", format!("({e})").dimmed());
            }
        }
    }
    Ok(())
}

/// Print the device catalog and price table.
pub fn catalog() -> Result<()> {
    println!("{}", "Device Catalog".bold());
    for kind in ALL_KINDS {
        let info = device(kind);
        println!("  {:<55} ${:>7}", info.name, format_thousands(info.price));
        if !info.specs.is_empty() {
            println!("    {}", console::style(info.specs).dim());
        }
    }
    Ok(())
}

/// Show daemon health.
pub async fn status(url: Option<&str>) -> Result<()> {
    let client = DaemonClient::new(url)?;
    let health = client.health().await?;
    println!(
        "netdraftd v{} - {} (up {}s)",
        health.version,
        health.status.green(),
        health.uptime_seconds
    );
    Ok(())
}

fn print_generated_design(context: &ConversationContext) {
    let mut req = requirements_from_collected(&context.collected_info);
    req.normalize();
    let design = generate_design(&req);

    println!();
    println!("{}", "Generated network design".green().bold());
    print!("{}", fragment_to_text(&design.output.ip_allocation));
    print!("{}", fragment_to_text(&design.output.recommendations));
    print!("{}", fragment_to_text(&design.output.cost_estimate));
}

/// Best-effort mapping from chat-collected fields onto requirements. There
/// is deliberately no schema validation: fields that do not parse keep
/// their defaults.
pub fn requirements_from_collected(info: &BTreeMap<String, String>) -> NetworkRequirements {
    let mut req = NetworkRequirements::default();
    if let Some(size) = info.get("companySize").and_then(|v| first_uint(v)) {
        req.business.company_size = size;
        req.business.office_users = size;
    }
    if let Some(users) = info.get("estimatedUsers").and_then(|v| first_uint(v)) {
        req.business.office_users = users;
    }
    req
}

static UINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static pattern"));

fn first_uint(value: &str) -> Option<u32> {
    UINT.find(value)?.as_str().parse().ok()
}

/// Flatten a report fragment for terminal display.
pub fn fragment_to_text(fragment: &str) -> String {
    let mut out = String::new();
    for raw_line in fragment.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line == "<ul>" || line == "</ul>" {
            continue;
        }
        if let Some(inner) = line.strip_prefix("<li>").and_then(|l| l.strip_suffix("</li>")) {
            out.push_str("  - ");
            out.push_str(inner);
            out.push('\n');
        } else {
            let text = strip_tags(line);
            if !text.is_empty() {
                out.push_str(&text);
                out.push('\n');
            }
        }
    }
    out
}

fn strip_tags(line: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_from_collected_parses_numbers() {
        let mut info = BTreeMap::new();
        info.insert("companySize".to_string(), "about 50 employees".to_string());
        info.insert("estimatedUsers".to_string(), "120".to_string());
        info.insert("industryType".to_string(), "retail".to_string());
        let req = requirements_from_collected(&info);
        assert_eq!(req.business.company_size, 50);
        assert_eq!(req.business.office_users, 120);
        assert!(req.departments.is_empty());
    }

    #[test]
    fn test_requirements_from_collected_tolerates_garbage() {
        let mut info = BTreeMap::new();
        info.insert("companySize".to_string(), "mid-sized".to_string());
        let req = requirements_from_collected(&info);
        assert_eq!(req.business.company_size, 0);
    }

    #[test]
    fn test_fragment_to_text() {
        let text = fragment_to_text(
            "<h3>IP Allocation:</h3>\n<ul>\n<li>Router: 192.168.1.1</li>\n</ul>",
        );
        assert_eq!(text, "IP Allocation:\n  - Router: 192.168.1.1\n");
    }

    #[test]
    fn test_design_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("requirements.toml");
        fs::write(
            &input,
            r#"
networkType = "lan"
securityLevel = 1

[business]
budget = 50000
officeUsers = 4

[[departments]]
name = "Sales"
users = 2
servers = 1
printers = 1
"#,
        )
        .unwrap();
        let out = dir.path().join("out");
        design(&input, &out, 1.0).unwrap();
        for artifact in [
            "ip_allocation.html",
            "recommendations.html",
            "cost_estimate.html",
            "network_diagram.svg",
            "network_diagram.png",
            "network_diagram.pdf",
            "network_diagram.drawio",
            "ip_allocation.csv",
            "ip_allocation.xlsx",
        ] {
            assert!(out.join(artifact).exists(), "missing {artifact}");
        }
    }
}
