// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of demo frames.

use crate::svg::escape_xml;

/// One captioned frame.
#[derive(Debug)]
pub(crate) struct HtmlFrame {
    pub(crate) caption: String,
    pub(crate) svg: String,
}

/// A titled row of frames.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) frames: Vec<HtmlFrame>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(title)));
    out.push_str(
        "<style>\
         body { font-family: sans-serif; margin: 24px; }\
         .row { display: flex; flex-wrap: wrap; gap: 16px; }\
         figure { margin: 0; text-align: center; }\
         figcaption { font-size: 12px; color: #555; }\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));

    for section in sections {
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(&section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.description)));
        out.push_str("<div class=\"row\">\n");
        for frame in &section.frames {
            out.push_str("<figure>\n");
            out.push_str(&frame.svg);
            out.push_str(&format!(
                "<figcaption>{}</figcaption>\n",
                escape_xml(&frame.caption)
            ));
            out.push_str("</figure>\n");
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}
