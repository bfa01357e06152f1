//! User-facing message texts.
//!
//! Everything the bot says lives here, in Indonesian, formatted with the
//! WhatsApp `*bold*` / `_italic_` conventions.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::{Department, Doctor, Reservation, WeeklySchedule};

// ============================================================================
// Date rendering
// ============================================================================

const DAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => DAY_NAMES[0],
        Weekday::Tue => DAY_NAMES[1],
        Weekday::Wed => DAY_NAMES[2],
        Weekday::Thu => DAY_NAMES[3],
        Weekday::Fri => DAY_NAMES[4],
        Weekday::Sat => DAY_NAMES[5],
        Weekday::Sun => DAY_NAMES[6],
    }
}

/// `Senin, 15 Januari 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        day_name(date),
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// `15/01/2025`
pub fn short_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

/// Title-case a stored schedule day key (`senin` -> `Senin`).
fn schedule_day_title(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn schedule_lines(schedule: &WeeklySchedule) -> String {
    schedule
        .ordered_days()
        .map(|(day, hours)| format!("{}: {}", schedule_day_title(day), hours.join(" - ")))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Menus and help
// ============================================================================

pub fn welcome() -> String {
    "\u{1F3E5} *Selamat Datang di Bot Reservasi Klinik*\n\n\
     Silakan pilih menu:\n\
     1\u{FE0F}\u{20E3} Ketik *DAFTAR* - Pendaftaran pasien baru\n\
     2\u{FE0F}\u{20E3} Ketik *JADWAL* - Lihat jadwal dokter\n\
     3\u{FE0F}\u{20E3} Ketik *RESERVASI* - Buat reservasi\n\
     4\u{FE0F}\u{20E3} Ketik *CEK ANTRIAN* - Cek status antrian\n\
     5\u{FE0F}\u{20E3} Ketik *BATAL* - Batalkan reservasi\n\
     6\u{FE0F}\u{20E3} Ketik *BANTUAN* - Bantuan\n\n\
     Ketik menu yang diinginkan."
        .to_string()
}

pub fn personalized_welcome(name: &str) -> String {
    format!("Halo *{name}*! \u{1F44B}\n\n{}", welcome())
}

pub fn help(admin_phone: &str) -> String {
    format!(
        "\u{1F4D6} *Panduan Penggunaan Bot*\n\n\
         *Menu Utama:*\n\
         \u{2022} DAFTAR - Daftar sebagai pasien baru\n\
         \u{2022} JADWAL - Lihat jadwal praktik dokter\n\
         \u{2022} RESERVASI - Buat reservasi/janji\n\
         \u{2022} CEK ANTRIAN - Cek status antrian Anda\n\
         \u{2022} BATAL - Batalkan reservasi\n\n\
         *Format Pendaftaran:*\n\
         Nama#NIK#TanggalLahir\n\n\
         *Contoh:*\n\
         Budi Santoso#1234567890123456#1990-05-15\n\n\
         *Bantuan:*\n\
         Hubungi admin: wa.me/{admin_phone}"
    )
}

// ============================================================================
// Errors
// ============================================================================

pub fn error(message: &str) -> String {
    format!("\u{274C} *Error*\n\n{message}\n\nKetik *BANTUAN* untuk panduan.")
}

pub fn generic_error() -> String {
    error("Terjadi kesalahan. Silakan coba lagi.")
}

pub fn invalid_selection(max: usize) -> String {
    error(&format!(
        "Pilihan tidak valid. Balas dengan angka 1-{max}."
    ))
}

pub fn flow_aborted() -> String {
    "\u{274C} Proses dibatalkan.\n\nKetik *MENU* untuk kembali ke menu utama.".to_string()
}

// ============================================================================
// Registration
// ============================================================================

pub fn registration_prompt() -> String {
    "\u{1F4DD} *Pendaftaran Pasien Baru*\n\n\
     Silakan kirim data Anda dengan format:\n\
     *Nama#NIK#Tanggal Lahir (YYYY-MM-DD)*\n\n\
     Contoh:\n\
     _Budi Santoso#1234567890123456#1990-05-15_"
        .to_string()
}

pub fn registration_invalid_format() -> String {
    error(
        "Format tidak valid!\n\n\
         Gunakan format:\n\
         *Nama#NIK#Tanggal Lahir*\n\n\
         Contoh: Budi Santoso#1234567890123456#1990-05-15",
    )
}

pub fn registration_success(name: &str, nik: &str) -> String {
    format!(
        "\u{2705} *Pendaftaran Berhasil!*\n\n\
         \u{1F464} Nama: *{name}*\n\
         \u{1F194} NIK: {nik}\n\n\
         Anda sekarang dapat membuat reservasi.\n\
         Ketik *RESERVASI* untuk membuat janji."
    )
}

pub fn already_registered(name: &str, nik: &str) -> String {
    format!(
        "\u{2705} Anda sudah terdaftar!\n\n\
         \u{1F464} Nama: *{name}*\n\
         \u{1F194} NIK: {nik}\n\n\
         Ketik *RESERVASI* untuk membuat janji."
    )
}

pub fn duplicate_nik() -> String {
    error("NIK sudah terdaftar. Hubungi admin jika Anda merasa ini adalah kesalahan.")
}

pub fn not_registered_for_reservation() -> String {
    error("Anda belum terdaftar.\n\nKetik *DAFTAR* untuk mendaftar terlebih dahulu.")
}

pub fn not_registered() -> String {
    error("Anda belum terdaftar.\n\nKetik *DAFTAR* untuk mendaftar.")
}

// ============================================================================
// Schedules
// ============================================================================

pub fn no_departments() -> String {
    "\u{1F4CB} Belum ada data poli. Silakan hubungi admin.".to_string()
}

pub fn no_doctors() -> String {
    "\u{1F4CB} Belum ada data dokter. Silakan hubungi admin.".to_string()
}

pub fn no_doctors_available() -> String {
    "\u{1F4CB} Belum ada data dokter tersedia. Silakan hubungi admin.".to_string()
}

pub fn department_list(departments: &[Department]) -> String {
    let list = departments
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. *{}*", i + 1, d.name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\u{1F4CB} *Daftar Poli*\n\n{list}\n\nBalas dengan *angka* untuk memilih poli."
    )
}

pub fn doctor_list(doctors: &[Doctor]) -> String {
    let list = doctors
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. *{}* ({})", i + 1, d.name, d.specialty))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\u{1F4CB} *Daftar Dokter*\n\n{list}\n\nBalas dengan *angka* untuk memilih dokter."
    )
}

pub fn department_schedule(department: &Department) -> String {
    let mut message = format!("\u{1F3E5} *{}*\n", department.name);
    if let Some(description) = &department.description {
        message.push_str(description);
        message.push('\n');
    }
    message.push_str("\n\u{1F4C5} Jadwal:\n");
    if department.schedule.is_empty() {
        message.push_str("Jadwal belum tersedia.");
    } else {
        message.push_str(&schedule_lines(&department.schedule));
    }
    message
}

pub fn doctor_schedule(doctor: &Doctor) -> String {
    let mut message = format!(
        "\u{1F468}\u{200D}\u{2695}\u{FE0F} *{}*\nSpesialisasi: {}\n\n\u{1F4C5} Jadwal Praktik:\n",
        doctor.name, doctor.specialty
    );
    if doctor.schedule.is_empty() {
        message.push_str("Jadwal belum tersedia.");
    } else {
        message.push_str(&schedule_lines(&doctor.schedule));
    }
    message
}

// ============================================================================
// Reservation flow
// ============================================================================

pub fn date_options(doctor_name: &str, dates: &[NaiveDate]) -> String {
    let list = dates
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {}", i + 1, long_date(*d)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\u{1F468}\u{200D}\u{2695}\u{FE0F} Dokter: *{doctor_name}*\n\n\
         \u{1F4C5} Pilih tanggal:\n{list}\n\n\
         Balas dengan *angka* untuk memilih tanggal.\n\
         Ketik *BATAL* atau *MENU* untuk kembali."
    )
}

pub fn time_options(date: NaiveDate, slots: &[&str]) -> String {
    let list = slots
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\u{1F4C5} Tanggal: *{}*\n\n\
         \u{1F550} Pilih waktu:\n{list}\n\n\
         Balas dengan *angka* untuk memilih waktu.\n\
         Ketik *BATAL* atau *MENU* untuk kembali.",
        long_date(date)
    )
}

pub fn reservation_success(
    doctor_name: &str,
    date: NaiveDate,
    time: &str,
    queue_number: &str,
) -> String {
    format!(
        "\u{2705} *Reservasi Berhasil!*\n\n\
         \u{1F468}\u{200D}\u{2695}\u{FE0F} Dokter: *{doctor_name}*\n\
         \u{1F4C5} Tanggal: {}\n\
         \u{1F550} Waktu: {time}\n\
         \u{1F3AB} Nomor Antrian: *{queue_number}*\n\n\
         Harap datang 15 menit sebelum jadwal.\n\
         Bawa KTP asli saat kunjungan.\n\n\
         Ketik *CEK ANTRIAN* untuk melihat status.",
        long_date(date)
    )
}

pub fn reservation_failed() -> String {
    error("Terjadi kesalahan saat membuat reservasi. Silakan coba lagi.")
}

// ============================================================================
// Queue status and cancellation
// ============================================================================

pub fn no_active_reservations() -> String {
    "\u{1F4ED} Tidak ada reservasi aktif.\n\nKetik *RESERVASI* untuk membuat janji.".to_string()
}

pub fn active_reservations(reservations: &[Reservation]) -> String {
    let mut message = String::from("\u{1F4CB} *Reservasi Aktif Anda:*\n\n");
    for (i, r) in reservations.iter().enumerate() {
        message.push_str(&format!("{}. \u{1F3AB} *{}*\n", i + 1, r.queue_number));
        message.push_str(&format!(
            "   \u{1F468}\u{200D}\u{2695}\u{FE0F} {}\n",
            r.doctor_name
        ));
        message.push_str(&format!("   \u{1F4C5} {}\n", short_date(r.date)));
        message.push_str(&format!("   \u{1F550} {}\n", r.time));
        message.push_str(&format!("   \u{1F4CC} Status: {}\n\n", r.status));
    }
    message
}

pub fn no_cancellable_reservations() -> String {
    "\u{1F4ED} Tidak ada reservasi aktif untuk dibatalkan.".to_string()
}

pub fn cancel_prompt(reservations: &[Reservation]) -> String {
    let mut message = String::from(
        "\u{1F5D1}\u{FE0F} *Pilih reservasi yang ingin dibatalkan:*\n\n",
    );
    for (i, r) in reservations.iter().enumerate() {
        message.push_str(&format!(
            "{}. \u{1F3AB} {} - {} ({})\n",
            i + 1,
            r.queue_number,
            r.doctor_name,
            short_date(r.date)
        ));
    }
    message.push_str(
        "\nBalas dengan *angka* untuk memilih.\nKetik *BATAL* untuk membatalkan proses.",
    );
    message
}

pub fn cancel_success(queue_number: &str) -> String {
    format!(
        "\u{2705} Reservasi *{queue_number}* berhasil dibatalkan.\n\n\
         Ketik *MENU* untuk kembali ke menu utama."
    )
}

pub fn cancel_failed() -> String {
    error("Terjadi kesalahan saat membatalkan reservasi.")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn long_date_is_indonesian() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(long_date(date), "Rabu, 15 Januari 2025");
    }

    #[test]
    fn short_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(short_date(date), "05/01/2025");
    }

    #[test]
    fn welcome_lists_every_command() {
        let text = welcome();
        for keyword in ["DAFTAR", "JADWAL", "RESERVASI", "CEK ANTRIAN", "BATAL", "BANTUAN"] {
            assert!(text.contains(keyword), "missing {keyword}");
        }
    }

    #[test]
    fn invalid_selection_names_the_range() {
        assert!(invalid_selection(3).contains("angka 1-3"));
    }

    #[test]
    fn doctor_schedule_renders_days_in_order() {
        let mut map = BTreeMap::new();
        map.insert("rabu".to_string(), vec!["08:00".into(), "12:00".into()]);
        map.insert("senin".to_string(), vec!["13:00".into(), "17:00".into()]);
        let doctor = Doctor {
            id: "d1".into(),
            name: "dr. Sari".into(),
            specialty: "Umum".into(),
            schedule: WeeklySchedule(map),
        };

        let text = doctor_schedule(&doctor);
        let senin = text.find("Senin: 13:00 - 17:00").unwrap();
        let rabu = text.find("Rabu: 08:00 - 12:00").unwrap();
        assert!(senin < rabu);
    }

    #[test]
    fn empty_schedule_has_placeholder() {
        let doctor = Doctor {
            id: "d1".into(),
            name: "dr. Sari".into(),
            specialty: "Umum".into(),
            schedule: WeeklySchedule::default(),
        };
        assert!(doctor_schedule(&doctor).contains("Jadwal belum tersedia."));
    }
}
