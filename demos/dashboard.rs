use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use hue_brewery::{Snapshot, StyleComposer, StyleConfig, StyleDescriptor,
                  style::ItemState};

type Err = Box<dyn Error>;

const SAMPLE: &str = r#"{
  "lights": {
    "1": {"name": "Ceiling", "state": {"on": true, "bri": 254,
          "colormode": "xy", "xy": [0.6, 0.35]}},
    "2": {"name": "Shelf", "state": {"on": true, "bri": 180,
          "colormode": "xy", "xy": [0.15, 0.06]}},
    "3": {"name": "Sofa", "state": {"on": true, "bri": 90,
          "colormode": "hs", "hue": 25500, "sat": 200}},
    "4": {"name": "Reading", "state": {"on": true, "bri": 140,
          "colormode": "ct", "xy": [0.45, 0.41]}},
    "5": {"name": "Porch", "state": {"on": false, "bri": 254}}
  },
  "groups": {
    "1": {"name": "Living room", "type": "Room", "lights": ["1", "2", "3"],
          "state": {"all_on": true, "any_on": true}},
    "2": {"name": "Study", "type": "Room", "lights": ["4"],
          "state": {"all_on": true, "any_on": true}},
    "3": {"name": "Outside", "type": "Room", "lights": ["5"],
          "state": {"all_on": false, "any_on": false}}
  }
}"#;

fn tile(fh: &mut impl Write, name: &str, d: &StyleDescriptor)
        -> Result<(), Err> {
    let class = match (d.state, &d.background) {
        (ItemState::Off, _) => "off".to_string(),
        (_, Some(_)) => format!("on colored-{}", d.legibility.as_str()),
        (_, None) => "on".to_string(),
    };
    let background = d.background.as_ref()
        .map(|b| b.to_string()).unwrap_or_default();
    let opacity = d.opacity.map(|o| format!(" opacity: {o};"))
        .unwrap_or_default();
    writeln!(fh, "  <div class=\"{class}\" style=\"{background}\">")?;
    writeln!(fh, "    <span style=\"{opacity}\">{name} ({} on)</span>",
             d.lights_on)?;
    if let Some(b) = d.brightness {
        writeln!(fh, "    <div class=\"bar\" style=\"width: {b}\"></div>")?;
    }
    writeln!(fh, "  </div>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut snapshot = match env::args().nth(1) {
        Some(path) => Snapshot::from_reader(File::open(path)?)?,
        None => Snapshot::from_json(SAMPLE)?,
    };
    snapshot.mark_unreachable_off();
    let styles = StyleComposer::new(&snapshot, StyleConfig::default());

    let mut fh = BufWriter::new(File::create("dashboard.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>hue-brewery: dashboard</title>\n\
                  <style>\n\
                  div.on, div.off {{ width: 160px; height: 60px; \
                  margin: 4px; display: inline-block; position: relative; \
                  border: 1px solid #888; }}\n\
                  .colored-light {{ color: #fff; }}\n\
                  .colored-dark {{ color: #000; }}\n\
                  .off {{ color: #888; }}\n\
                  .bar {{ position: absolute; bottom: 0; height: 4px; \
                  background: #fff; }}\n\
                  </style>\n\
                  </head>\n\
                  <body>")?;
    writeln!(fh, "<h3>Lights</h3>")?;
    for (id, d) in styles.lights() {
        let name = snapshot.lights[id].name.as_str();
        tile(&mut fh, name, &d)?;
    }
    writeln!(fh, "<h3>Groups</h3>")?;
    for (id, d) in styles.groups() {
        let name = snapshot.groups[id].name.as_str();
        tile(&mut fh, name, &d)?;
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
