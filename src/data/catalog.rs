//! The fixed catalog of Origin Energy generation sites on the NEM.

use crate::domain::{SiteDescriptor, StationType};

const SITES: &[SiteDescriptor] = &[
    SiteDescriptor {
        code: "CHALLWF",
        station_type: StationType::Wind,
        name: "Challicum Hills Wind Farm",
        location: "Ararat, VIC",
    },
    SiteDescriptor {
        code: "CULLERIN",
        station_type: StationType::Wind,
        name: "Cullerin Range Wind Farm",
        location: "Upper Lachlan Shire, NSW",
    },
    SiteDescriptor {
        code: "DAYDSF",
        station_type: StationType::Solar,
        name: "Daydream Solar Farm",
        location: "Collinsville, QLD",
    },
    SiteDescriptor {
        code: "DDPS1",
        station_type: StationType::Gas,
        name: "Darling Downs Power Station",
        location: "Kogan, QLD",
    },
    SiteDescriptor {
        code: "DDSF",
        station_type: StationType::Solar,
        name: "Darling Downs Solar Farm",
        location: "Kogan, QLD",
    },
    SiteDescriptor {
        code: "ERARING",
        station_type: StationType::Coal,
        name: "Eraring Power Station",
        location: "Dora Creek, NSW",
    },
    SiteDescriptor {
        code: "ERGT01",
        station_type: StationType::Coal,
        name: "Eraring Power Station",
        location: "Dora Creek, NSW",
    },
    SiteDescriptor {
        code: "LADBROKE",
        station_type: StationType::Gas,
        name: "Ladbroke Grove Power Station",
        location: "Monbulla, SA",
    },
    SiteDescriptor {
        code: "MORTLK",
        station_type: StationType::Gas,
        name: "Mortlake Grove Power Station",
        location: "Mortlake, VIC",
    },
    SiteDescriptor {
        code: "QUARANTN",
        station_type: StationType::Gas,
        name: "Quarantine Power Station",
        location: "Adelaide, SA",
    },
    SiteDescriptor {
        code: "URANQ",
        station_type: StationType::Gas,
        name: "Uranquinty Power Station",
        location: "Uranquinty, NSW",
    },
];

/// All known sites, in reporting order.
pub fn list_sites() -> &'static [SiteDescriptor] {
    SITES
}
