use super::view::TickerView;

const LOGO_URL: &str = "https://i.imgur.com/EZ1h5S1.png";
const ATTRIBUTION_URL: &str = "https://www.gemini.com/india";
const LINK_STYLE: &str = "text-decoration: none; color: rgb(16, 112, 224);";
const STAT_STYLE: &str =
    "text-align:center;float:left;flex: 1;font-size:12px;padding:12px 0 16px 0;line-height:1em;";

pub fn loading_fragment() -> String {
    concat!(
        r#"<div id="loading-spinner" style="display: flex; justify-content: center; align-items: center; height: 100px;">"#,
        r#"<div class="loader" style="border: 16px solid #f3f3f3; border-top: 16px solid #3498db; border-radius: 50%; width: 60px; height: 60px; animation: spin 2s linear infinite;"></div>"#,
        "</div>"
    )
    .to_string()
}

pub fn ticker_fragment(view: &TickerView) -> String {
    let coin = escape(&view.coin);
    let base = escape(&view.base_currency);

    let mut out = String::with_capacity(2048);
    out.push_str(r#"<div style="font-family: '__Inter_a64ecd','__Inter_Fallback_a64ecd';">"#);

    // Header: logo, pair link, price
    out.push_str(r#"<div style="display:flex;padding:12px 0px; justify-content: center; align-items: center; gap: 1rem;">"#);
    out.push_str(&format!(
        r#"<div style="width:max-content;display: flex;justify-content: center;align-items: center;"><img style="width:46px;height:46px;" src="{LOGO_URL}"></div>"#
    ));
    out.push_str(r#"<div style="border: none;text-align:left;line-height:1.4">"#);
    out.push_str(&format!(
        r#"<span style="font-size: 18px;"><a href="{}" target="_blank" style="{LINK_STYLE}">{coin} ({base})</a></span><br>"#,
        escape(&view.coin_url)
    ));
    out.push_str(&format!(
        r#"<span style="font-size: 16px;"><span style="font-size: 20px; font-weight: 500;">{}</span> <span style="font-size: 14px; font-weight: 500;">{base}</span></span>"#,
        view.price.as_deref().unwrap_or_default()
    ));
    out.push_str("</div></div>");

    // Stats row
    out.push_str(r#"<div style="border-top: 1px solid #e1e5ea;display: flex; align-items:center; justify-content: space-around;">"#);
    out.push_str(&format!(
        r#"<div style="{STAT_STYLE}">VOLUME<br><br><span style="font-size: 16px;">{} <span style="font-size:12px">{base}</span></span></div>"#,
        view.volume
    ));
    if let Some(percent) = &view.percent_change {
        out.push_str(&format!(
            r#"<div style="{STAT_STYLE}">% CHANGE (24H)<br><br><span style="font-size: 16px;color:{};">{}</span></div>"#,
            percent.trend.color(),
            percent.text.as_deref().unwrap_or_default()
        ));
    }
    out.push_str("</div>");

    // Footer
    out.push_str(&format!(
        r#"<div style="border-top: 1px solid #e1e5ea;text-align:center;clear:both;font-size:12px;font-style:italic;padding:8px 0;"><a href="{ATTRIBUTION_URL}" target="_blank" style="{LINK_STYLE}">Powered by Gemini 🪐</a></div>"#
    ));

    out.push_str("</div>");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
