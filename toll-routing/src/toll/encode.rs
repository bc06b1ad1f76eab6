//! Outbound payload encoders.

use quick_xml::escape::escape;
use tracing::debug;

use crate::domain::{RouteOptions, Waypoint};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Status flag on every outbound dataset. The service requires it and reads
/// 0 as "not yet processed"; this side never changes it.
const UNPROCESSED: &str = "0";

/// Append `<name>content</name>`. `content` must already be escaped.
fn push_element(xml: &mut String, name: &str, content: &str) {
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(content);
    xml.push_str("</");
    xml.push_str(name);
    xml.push('>');
}

fn push_waypoint(xml: &mut String, waypoint: &Waypoint) {
    let code = waypoint.ibge_code.unwrap_or(0);
    let (lat, lon) = waypoint
        .coordinate
        .map(|c| (c.lat(), c.lon()))
        .unwrap_or((0.0, 0.0));
    let description = waypoint.description.as_deref().unwrap_or("");

    xml.push_str("<ponto>");
    push_element(xml, "codigoIBGE", &code.to_string());
    xml.push_str("<latLong>");
    push_element(xml, "latitude", &lat.to_string());
    push_element(xml, "longitude", &lon.to_string());
    xml.push_str("</latLong>");
    push_element(xml, "descricao", &escape(description));
    xml.push_str("</ponto>");
}

/// Encode the stop list for a toll routing request.
///
/// Layout (shown indented; the real output has no whitespace):
///
/// ```text
/// <pontosParada xmlns:xsi="...">
///   <pontoParada>
///     <ponto>
///       <codigoIBGE>3550308</codigoIBGE>
///       <latLong><latitude>-23.5505</latitude><longitude>-46.6333</longitude></latLong>
///       <descricao>São Paulo</descricao>
///     </ponto>
///     ...
///   </pontoParada>
///   <status>0</status>
/// </pontosParada>
/// ```
///
/// Missing codes and coordinates are written as `0`, a missing description
/// as an empty element.
pub fn encode_waypoints(waypoints: &[Waypoint]) -> String {
    let mut xml = String::with_capacity(128 + waypoints.len() * 192);

    xml.push_str("<pontosParada xmlns:xsi=\"");
    xml.push_str(XSI_NAMESPACE);
    xml.push_str("\">");
    xml.push_str("<pontoParada>");
    for waypoint in waypoints {
        push_waypoint(&mut xml, waypoint);
    }
    xml.push_str("</pontoParada>");
    push_element(&mut xml, "status", UNPROCESSED);
    xml.push_str("</pontosParada>");

    debug!(
        waypoints = waypoints.len(),
        bytes = xml.len(),
        "encoded toll stop list"
    );
    xml
}

/// Encode routing options.
///
/// The service deserializes by position, so the order
/// `alternativas`, `status`, `tipoRota` is part of the format.
pub fn encode_route_options(options: &RouteOptions) -> String {
    let alternatives = if options.allow_alternatives {
        "true"
    } else {
        "false"
    };

    let mut xml = String::with_capacity(96);
    xml.push_str("<opcoesRota>");
    push_element(&mut xml, "alternativas", alternatives);
    push_element(&mut xml, "status", UNPROCESSED);
    push_element(&mut xml, "tipoRota", &options.route_type.to_string());
    xml.push_str("</opcoesRota>");
    xml
}

/// Plaza ids for temporary route registration.
///
/// The registration call binds these positionally as a typed integer array,
/// so they go to the transport as-is, in order, with no XML wrapping.
pub fn encode_plaza_id_list(ids: &[i64]) -> Vec<i64> {
    ids.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn sao_paulo() -> Waypoint {
        Waypoint::new(
            3550308,
            "São Paulo & Cia",
            Coordinate::new(-23.5505, -46.6333).unwrap(),
        )
    }

    #[test]
    fn single_waypoint_exact_bytes() {
        let xml = encode_waypoints(&[sao_paulo()]);
        assert_eq!(
            xml,
            "<pontosParada xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
             <pontoParada>\
             <ponto>\
             <codigoIBGE>3550308</codigoIBGE>\
             <latLong><latitude>-23.5505</latitude><longitude>-46.6333</longitude></latLong>\
             <descricao>São Paulo &amp; Cia</descricao>\
             </ponto>\
             </pontoParada>\
             <status>0</status>\
             </pontosParada>"
        );
    }

    #[test]
    fn waypoints_keep_order() {
        let rio = Waypoint::new(
            3304557,
            "Rio de Janeiro",
            Coordinate::new(-22.9068, -43.1729).unwrap(),
        );
        let xml = encode_waypoints(&[sao_paulo(), rio]);
        let sp = xml.find("<codigoIBGE>3550308</codigoIBGE>").unwrap();
        let rj = xml.find("<codigoIBGE>3304557</codigoIBGE>").unwrap();
        assert!(sp < rj);
        assert_eq!(xml.matches("<ponto>").count(), 2);
        assert!(xml.ends_with("</pontoParada><status>0</status></pontosParada>"));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let xml = encode_waypoints(&[Waypoint::default()]);
        assert!(xml.contains(
            "<ponto><codigoIBGE>0</codigoIBGE>\
             <latLong><latitude>0</latitude><longitude>0</longitude></latLong>\
             <descricao></descricao></ponto>"
        ));
    }

    #[test]
    fn description_is_fully_escaped() {
        let wp = Waypoint {
            description: Some(r#"<Posto> "Km 10" & O'Brien"#.to_string()),
            ..Waypoint::default()
        };
        let xml = encode_waypoints(&[wp]);
        assert!(xml.contains(
            "<descricao>&lt;Posto&gt; &quot;Km 10&quot; &amp; O&apos;Brien</descricao>"
        ));
    }

    #[test]
    fn empty_list_still_has_envelope() {
        assert_eq!(
            encode_waypoints(&[]),
            "<pontosParada xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
             <pontoParada></pontoParada><status>0</status></pontosParada>"
        );
    }

    #[test]
    fn route_options_default() {
        assert_eq!(
            encode_route_options(&RouteOptions::default()),
            "<opcoesRota><alternativas>false</alternativas><status>0</status><tipoRota>1</tipoRota></opcoesRota>"
        );
    }

    #[test]
    fn route_options_with_alternatives() {
        assert_eq!(
            encode_route_options(&RouteOptions::new(true, 2)),
            "<opcoesRota><alternativas>true</alternativas><status>0</status><tipoRota>2</tipoRota></opcoesRota>"
        );
    }

    #[test]
    fn plaza_ids_pass_through_in_order() {
        assert_eq!(encode_plaza_id_list(&[30, 10, 20]), vec![30, 10, 20]);
        assert!(encode_plaza_id_list(&[]).is_empty());
    }
}
